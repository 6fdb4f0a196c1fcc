//! ONNX Runtime classifier for exported models (e.g. XGBoost via onnxmltools).
//!
//! Expects a single float input of shape `[batch, n_features]` and a first
//! output holding the predicted class labels as `int64`.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use tracing::info;

use crate::classifier::{Classifier, ClassifierError};

pub struct OnnxClassifier {
    // `Session::run` needs `&mut`; the lock serialises concurrent callers.
    session: Mutex<Session>,
    input_name: String,
    n_features: usize,
}

impl OnnxClassifier {
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let session = Session::builder()?.commit_from_file(path)?;

        let input = session
            .inputs()
            .first()
            .ok_or_else(|| ClassifierError::Malformed("model declares no inputs".into()))?;
        let input_name = input.name().to_string();
        let n_features = infer_width(input.dtype()).ok_or_else(|| {
            ClassifierError::Malformed(format!(
                "cannot infer feature count from input {input_name:?}"
            ))
        })?;

        info!(
            features = n_features,
            input = %input_name,
            model = %path.display(),
            "loaded onnx classifier"
        );
        Ok(Self {
            session: Mutex::new(session),
            input_name,
            n_features,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn kind(&self) -> &'static str {
        "onnx"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<i64, ClassifierError> {
        if features.len() != self.n_features {
            return Err(ClassifierError::InputShape {
                expected: self.n_features,
                found: features.len(),
            });
        }

        let data: Vec<f32> = features.iter().map(|&v| v as f32).collect();
        let shape = [1i64, features.len() as i64];
        let tensor = Tensor::from_array((shape, data.into_boxed_slice()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ClassifierError::Other("onnx session lock poisoned".into()))?;
        let outputs = session.run(ort::inputs![self.input_name.as_str() => tensor])?;

        let (_, labels) = outputs[0].try_extract_tensor::<i64>()?;
        labels
            .first()
            .copied()
            .ok_or_else(|| ClassifierError::Malformed("empty label output".into()))
    }
}

/// Feature count from the last dimension of the input tensor type.
fn infer_width(input_type: &ort::value::ValueType) -> Option<usize> {
    match input_type {
        ort::value::ValueType::Tensor { shape, .. } => width_from_dims(shape),
        _ => None,
    }
}

/// Last dimension if fixed; dynamic (`-1`) or zero width yields `None`.
fn width_from_dims(dims: &[i64]) -> Option<usize> {
    dims.last()
        .and_then(|&d| if d > 0 { Some(d as usize) } else { None })
}
