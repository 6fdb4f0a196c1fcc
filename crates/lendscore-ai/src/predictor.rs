//! Predictor: checks a feature record against the loaded artifact and
//! invokes it.
//!
//! A predictor whose artifact failed to load stays usable as a value but
//! answers every request with [`InferenceError::ModelUnavailable`], so a
//! broken artifact can never yield a verdict.

use std::path::Path;
use std::sync::Arc;

use lendscore_core::schema::column_names;
use lendscore_core::{FEATURE_COUNT, FeatureRecord, Verdict};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::artifact::load_artifact;
use crate::classifier::{Classifier, ClassifierError};

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("model unavailable: {reason}")]
    ModelUnavailable { reason: String },

    #[error("feature record has {found} columns, expected {expected}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("column {position} is {found:?}, model was trained with {expected:?}")]
    ColumnOrder {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("classifier failed: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("classifier returned class {0}, expected 0 or 1")]
    InvalidClass(i64),
}

#[derive(Clone)]
enum ModelState {
    Ready(Arc<dyn Classifier>),
    Unavailable { reason: String },
}

/// Shared handle to a loaded classifier artifact.
///
/// Cheap to clone; all clones share the same read-only artifact.
#[derive(Clone)]
pub struct Predictor {
    state: ModelState,
}

impl Predictor {
    pub fn from_classifier(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            state: ModelState::Ready(classifier),
        }
    }

    /// A predictor with no artifact. Every prediction fails with `reason`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: ModelState::Unavailable {
                reason: reason.into(),
            },
        }
    }

    /// Load the artifact at `path`, recording a load failure instead of
    /// returning it.
    pub fn load(path: &Path) -> Self {
        match load_artifact(path) {
            Ok(classifier) => {
                info!(
                    kind = classifier.kind(),
                    features = classifier.n_features(),
                    "predictor ready"
                );
                Self::from_classifier(classifier)
            }
            Err(e) => {
                error!(model = %path.display(), error = %e, "model artifact failed to load");
                Self::unavailable(e.to_string())
            }
        }
    }

    /// Load the artifact at `path`, failing if it cannot be loaded.
    pub fn try_load(path: &Path) -> Result<Self, InferenceError> {
        let predictor = Self::load(path);
        predictor.classifier()?;
        Ok(predictor)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ModelState::Ready(_))
    }

    pub fn classifier(&self) -> Result<&Arc<dyn Classifier>, InferenceError> {
        match &self.state {
            ModelState::Ready(classifier) => Ok(classifier),
            ModelState::Unavailable { reason } => Err(InferenceError::ModelUnavailable {
                reason: reason.clone(),
            }),
        }
    }

    /// Predict the verdict for one encoded application.
    pub fn predict(&self, record: &FeatureRecord) -> Result<Verdict, InferenceError> {
        let classifier = self.classifier()?;
        check_shape(classifier.as_ref(), record)?;

        let class = classifier.predict(record.values())?;
        let verdict = Verdict::from_class(class).ok_or(InferenceError::InvalidClass(class))?;
        debug!(class, verdict = %verdict, "prediction");
        Ok(verdict)
    }
}

/// Reject records whose width or column order differs from what the
/// artifact was trained on.
fn check_shape(classifier: &dyn Classifier, record: &FeatureRecord) -> Result<(), InferenceError> {
    if record.len() != FEATURE_COUNT {
        return Err(InferenceError::ShapeMismatch {
            expected: FEATURE_COUNT,
            found: record.len(),
        });
    }
    if classifier.n_features() != FEATURE_COUNT {
        return Err(InferenceError::ShapeMismatch {
            expected: classifier.n_features(),
            found: record.len(),
        });
    }
    if let Some(names) = classifier.feature_names() {
        for (position, (expected, found)) in names.iter().zip(column_names()).enumerate() {
            if expected != found {
                return Err(InferenceError::ColumnOrder {
                    position,
                    expected: expected.clone(),
                    found: found.to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensemble::TreeEnsemble;
    use crate::test_fixtures::{loan_ensemble_json, reference_record, with_value};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn loan_predictor() -> Predictor {
        let model = TreeEnsemble::from_json(&loan_ensemble_json()).unwrap();
        Predictor::from_classifier(Arc::new(model))
    }

    /// Returns a fixed class and counts calls.
    struct FixedClassifier {
        class: i64,
        width: usize,
        calls: AtomicUsize,
    }

    impl FixedClassifier {
        fn new(class: i64, width: usize) -> Self {
            Self {
                class,
                width,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Classifier for FixedClassifier {
        fn kind(&self) -> &'static str {
            "fixed"
        }

        fn n_features(&self) -> usize {
            self.width
        }

        fn predict(&self, _features: &[f64]) -> Result<i64, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.class)
        }
    }

    #[test]
    fn reference_application_is_non_defaulter() {
        // Credit_Score 750, LTV 80, good credit: -0.8 + -0.3 < 0.
        let verdict = loan_predictor().predict(&reference_record()).unwrap();
        assert_eq!(verdict, Verdict::NonDefaulter);
    }

    #[test]
    fn low_score_bad_credit_is_defaulter() {
        let record = with_value(&reference_record(), "Credit_Score", 550.0);
        let record = with_value(&record, "Credit_Worthiness", 1.0);
        let verdict = loan_predictor().predict(&record).unwrap();
        assert_eq!(verdict, Verdict::Defaulter);
    }

    #[test]
    fn high_ltv_tips_the_margin() {
        // 0.4 + -0.3 > 0.
        let record = with_value(&reference_record(), "LTV", 95.0);
        assert_eq!(loan_predictor().predict(&record).unwrap(), Verdict::Defaulter);
    }

    #[test]
    fn same_record_same_verdict() {
        let predictor = loan_predictor();
        let record = with_value(&reference_record(), "LTV", 95.0);
        let first = predictor.predict(&record).unwrap();
        for _ in 0..10 {
            assert_eq!(predictor.predict(&record).unwrap(), first);
        }
    }

    #[test]
    fn clones_share_the_artifact() {
        let clf = Arc::new(FixedClassifier::new(1, FEATURE_COUNT));
        let predictor = Predictor::from_classifier(clf.clone());
        let clone = predictor.clone();

        predictor.predict(&reference_record()).unwrap();
        clone.predict(&reference_record()).unwrap();
        assert_eq!(clf.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn shared_across_threads() {
        let predictor = loan_predictor();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let p = predictor.clone();
                std::thread::spawn(move || p.predict(&reference_record()).unwrap())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), Verdict::NonDefaulter);
        }
    }

    #[test]
    fn failed_load_makes_every_predict_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = Predictor::load(&dir.path().join("missing.json"));
        assert!(!predictor.is_ready());

        for _ in 0..3 {
            let err = predictor.predict(&reference_record()).unwrap_err();
            assert!(
                matches!(err, InferenceError::ModelUnavailable { .. }),
                "{err}"
            );
        }
    }

    #[test]
    fn corrupt_artifact_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "not a model").unwrap();

        let predictor = Predictor::load(&path);
        assert!(matches!(
            predictor.predict(&reference_record()),
            Err(InferenceError::ModelUnavailable { .. })
        ));
    }

    #[test]
    fn try_load_surfaces_failure() {
        let dir = tempfile::tempdir().unwrap();
        let result = Predictor::try_load(&dir.path().join("missing.json"));
        assert!(matches!(
            result,
            Err(InferenceError::ModelUnavailable { reason }) if reason.contains("not found")
        ));
    }

    #[test]
    fn try_load_succeeds_for_valid_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, loan_ensemble_json()).unwrap();

        let predictor = Predictor::try_load(&path).unwrap();
        assert!(predictor.is_ready());
        assert_eq!(
            predictor.predict(&reference_record()).unwrap(),
            Verdict::NonDefaulter
        );
    }

    #[test]
    fn short_record_is_shape_mismatch() {
        let clf = Arc::new(FixedClassifier::new(0, FEATURE_COUNT));
        let predictor = Predictor::from_classifier(clf.clone());
        let record = FeatureRecord::from_values(vec![0.0; 30]);

        assert!(matches!(
            predictor.predict(&record),
            Err(InferenceError::ShapeMismatch {
                expected: 31,
                found: 30
            })
        ));
        // The artifact is never called with a bad record.
        assert_eq!(clf.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn artifact_of_different_width_is_shape_mismatch() {
        let predictor = Predictor::from_classifier(Arc::new(FixedClassifier::new(0, 30)));
        assert!(matches!(
            predictor.predict(&reference_record()),
            Err(InferenceError::ShapeMismatch {
                expected: 30,
                found: 31
            })
        ));
    }

    #[test]
    fn reordered_training_columns_are_rejected() {
        let mut names: Vec<String> = column_names().map(String::from).collect();
        names.swap(0, 1);
        let dump = json!({
            "feature_names": names,
            "trees": [{ "nodeid": 0, "leaf": 0.1 }]
        });
        let model = TreeEnsemble::from_json(&dump.to_string()).unwrap();
        let predictor = Predictor::from_classifier(Arc::new(model));

        let err = predictor.predict(&reference_record()).unwrap_err();
        match err {
            InferenceError::ColumnOrder {
                position,
                expected,
                found,
            } => {
                assert_eq!(position, 0);
                assert_eq!(expected, "Gender");
                assert_eq!(found, "loan_limit");
            }
            other => panic!("expected ColumnOrder, got {other}"),
        }
    }

    #[test]
    fn out_of_range_class_is_rejected() {
        let predictor =
            Predictor::from_classifier(Arc::new(FixedClassifier::new(2, FEATURE_COUNT)));
        assert!(matches!(
            predictor.predict(&reference_record()),
            Err(InferenceError::InvalidClass(2))
        ));
    }
}
