//! Classifier trait.
//!
//! Backends implement [`ImageClassifier`] so the analysis pipeline does not
//! couple to a specific runtime. The ONNX backend lives in
//! [`super::onnx`]; tests plug in fixed-output fakes.

use crate::Result;
use crate::preprocess::ImageTensor;
use crate::types::ProbabilityVector;

/// A pretrained two-class image classifier.
///
/// Implementations are loaded once and shared read-only across requests, so
/// `predict` takes `&self`. Output order follows the label mapping the model
/// was trained with.
pub trait ImageClassifier: Send + Sync {
    /// Backend name for logging/debugging.
    fn name(&self) -> &str;

    /// Run one forward pass over a preprocessed image batch of size 1.
    fn predict(&self, tensor: &ImageTensor) -> Result<ProbabilityVector>;
}
