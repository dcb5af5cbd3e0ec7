//! Classifier handle: the loaded model plus its label mapping.
//!
//! Built once at process start and passed by reference into every analysis.
//! There is no global lookup; a failed load returns `ModelUnavailable` and
//! the caller decides how to disable analysis.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::model::{Device, ImageClassifier, LabelMapping, OutputActivation};
use crate::preprocess::ImageTensor;
use crate::types::ProbabilityVector;

/// Default model file name, resolved against the model directory.
pub const DEFAULT_MODEL_FILE: &str = "cnn_thyroid_model.onnx";

/// Default label mapping file name, resolved against the model directory.
pub const DEFAULT_LABELS_FILE: &str = "label_encoder.json";

/// Where to find the classifier artifacts and how to run them.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// ONNX model file.
    pub model_path: PathBuf,

    /// Label mapping JSON file.
    pub labels_path: PathBuf,

    /// Device for inference.
    pub device: Device,

    /// How to read the model's output row.
    pub activation: OutputActivation,
}

impl Default for ModelConfig {
    fn default() -> Self {
        let dir = default_model_dir();
        Self {
            model_path: dir.join(DEFAULT_MODEL_FILE),
            labels_path: dir.join(DEFAULT_LABELS_FILE),
            device: Device::default(),
            activation: OutputActivation::default(),
        }
    }
}

/// `THYRA_MODEL_DIR`, or the working directory.
pub fn default_model_dir() -> PathBuf {
    std::env::var("THYRA_MODEL_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Immutable, cheaply clonable classifier service.
#[derive(Clone)]
pub struct ClassifierHandle {
    classifier: Arc<dyn ImageClassifier>,
    labels: LabelMapping,
}

impl std::fmt::Debug for ClassifierHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierHandle")
            .field("classifier", &self.classifier.name())
            .field("labels", &self.labels)
            .finish()
    }
}

impl ClassifierHandle {
    /// Wrap an already-constructed backend.
    pub fn new(classifier: Arc<dyn ImageClassifier>, labels: LabelMapping) -> Self {
        Self { classifier, labels }
    }

    /// Load the label mapping and the ONNX model.
    ///
    /// Either artifact missing or unreadable yields `ModelUnavailable`.
    #[cfg(feature = "onnx")]
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let labels = LabelMapping::load(&config.labels_path)?;
        let classifier = crate::model::OnnxClassifier::new(
            &config.model_path,
            config.device,
            config.activation,
        )?;
        info!(
            model = %config.model_path.display(),
            device = config.device.name(),
            "classifier loaded"
        );
        Ok(Self::new(Arc::new(classifier), labels))
    }

    /// Without a runtime backend compiled in, loading always fails.
    #[cfg(not(feature = "onnx"))]
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let _ = LabelMapping::load(&config.labels_path)?;
        info!("onnx feature disabled; classifier not loaded");
        Err(crate::ThyraError::model_unavailable(
            config.model_path.display().to_string(),
            "built without the `onnx` feature",
        ))
    }

    /// Run the classifier on a preprocessed image.
    pub fn predict(&self, tensor: &ImageTensor) -> Result<ProbabilityVector> {
        self.classifier.predict(tensor)
    }

    pub fn labels(&self) -> &LabelMapping {
        &self.labels
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_standard_file_names() {
        let config = ModelConfig::default();
        assert!(config.model_path.ends_with(DEFAULT_MODEL_FILE));
        assert!(config.labels_path.ends_with(DEFAULT_LABELS_FILE));
        assert_eq!(config.device, Device::Cpu);
        assert_eq!(config.activation, OutputActivation::Probabilities);
    }

    #[test]
    fn load_fails_without_artifacts() {
        let config = ModelConfig {
            model_path: PathBuf::from("/nonexistent/model.onnx"),
            labels_path: PathBuf::from("/nonexistent/labels.json"),
            ..Default::default()
        };
        let err = ClassifierHandle::load(&config).unwrap_err();
        assert!(matches!(err, crate::ThyraError::ModelUnavailable { .. }));
    }
}
