//! Classifier loading and inference.

pub mod activation;
pub mod device;
pub mod handle;
pub mod labels;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod traits;

pub use activation::OutputActivation;
pub use device::Device;
pub use handle::{
    ClassifierHandle, DEFAULT_LABELS_FILE, DEFAULT_MODEL_FILE, ModelConfig, default_model_dir,
};
pub use labels::LabelMapping;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
pub use traits::ImageClassifier;
