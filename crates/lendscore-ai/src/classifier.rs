//! The capability a trained model artifact exposes to the predictor.

use std::path::PathBuf;

use thiserror::Error;

/// A loaded, read-only binary classifier.
///
/// Implementations are shared across callers behind an `Arc`, so `predict`
/// takes `&self` and must be safe to call concurrently.
pub trait Classifier: Send + Sync {
    /// Short format name for logs (e.g. `tree-ensemble`).
    fn kind(&self) -> &'static str;

    /// Number of input features the artifact was trained on.
    fn n_features(&self) -> usize;

    /// Feature names in training order, if the artifact records them.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Predict the class index for one feature vector.
    fn predict(&self, features: &[f64]) -> Result<i64, ClassifierError>;
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("model artifact not found: {0}")]
    NotFound(PathBuf),

    #[error("unsupported model artifact: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("tree ensemble parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed model: {0}")]
    Malformed(String),

    #[error("input has {found} features, model expects {expected}")]
    InputShape { expected: usize, found: usize },

    #[cfg(feature = "onnx")]
    #[error("onnx runtime error: {0}")]
    Onnx(#[from] ort::Error),

    #[error("{0}")]
    Other(String),
}
