//! Artifact loading: pick a [`Classifier`] implementation by file extension.

use std::path::Path;
use std::sync::Arc;

use crate::classifier::{Classifier, ClassifierError};
use crate::ensemble::TreeEnsemble;

/// Default artifact location, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "models/xgb_model.json";

/// Load a classifier artifact from disk.
///
/// - `.json`: [`TreeEnsemble`] (XGBoost JSON dump)
/// - `.onnx`: ONNX Runtime model, requires the `onnx` feature
pub fn load_artifact(path: &Path) -> Result<Arc<dyn Classifier>, ClassifierError> {
    if !path.exists() {
        return Err(ClassifierError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "json" => Ok(Arc::new(TreeEnsemble::load(path)?)),
        "onnx" => load_onnx(path),
        other => Err(ClassifierError::UnsupportedFormat(format!(
            "{} (extension {other:?})",
            path.display()
        ))),
    }
}

#[cfg(feature = "onnx")]
fn load_onnx(path: &Path) -> Result<Arc<dyn Classifier>, ClassifierError> {
    Ok(Arc::new(crate::onnx::OnnxClassifier::load(path)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(path: &Path) -> Result<Arc<dyn Classifier>, ClassifierError> {
    Err(ClassifierError::UnsupportedFormat(format!(
        "{}: built without the `onnx` feature",
        path.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::loan_ensemble_json;

    #[test]
    fn loads_json_ensemble() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, loan_ensemble_json()).unwrap();

        let clf = load_artifact(&path).unwrap();
        assert_eq!(clf.kind(), "tree-ensemble");
        assert_eq!(clf.n_features(), lendscore_core::FEATURE_COUNT);
    }

    #[test]
    fn extension_match_ignores_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MODEL.JSON");
        std::fs::write(&path, loan_ensemble_json()).unwrap();
        assert!(load_artifact(&path).is_ok());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(
            load_artifact(&path),
            Err(ClassifierError::NotFound(p)) if p == path
        ));
    }

    #[test]
    fn pickle_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xgb_model.pkl");
        std::fs::write(&path, b"\x80\x04").unwrap();
        assert!(matches!(
            load_artifact(&path),
            Err(ClassifierError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn corrupt_json_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{\"trees\": [").unwrap();
        assert!(matches!(
            load_artifact(&path),
            Err(ClassifierError::Json(_))
        ));
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn onnx_requires_feature() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.onnx");
        std::fs::write(&path, b"").unwrap();
        let err = load_artifact(&path).err().unwrap();
        assert!(err.to_string().contains("onnx"), "{err}");
    }
}
