//! Inference layer: classifier artifacts and the predictor that invokes them.

mod artifact;
mod classifier;
mod ensemble;
#[cfg(feature = "onnx")]
mod onnx;
mod predictor;

#[cfg(test)]
mod test_fixtures;

pub use artifact::{DEFAULT_MODEL_PATH, load_artifact};
pub use classifier::{Classifier, ClassifierError};
pub use ensemble::TreeEnsemble;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
pub use predictor::{InferenceError, Predictor};
