//! Local image classification via ONNX Runtime.
//!
//! Expects a model exported from the Keras training network: one NHWC
//! `float32` input of shape `(1, 128, 128, 3)` and one output of shape
//! `(1, 2)`.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::TensorRef;
use tracing::debug;

use crate::error::{Result, ThyraError};
use crate::model::{Device, ImageClassifier, OutputActivation};
use crate::preprocess::ImageTensor;
use crate::types::ProbabilityVector;

/// Classifier backed by an ONNX Runtime session.
///
/// ONNX Runtime needs exclusive access to run a session, so it sits behind a
/// mutex. Nothing else about the classifier changes after load.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    name: String,
    activation: OutputActivation,
    device: Device,
}

impl OnnxClassifier {
    /// Load a model file.
    pub fn new(model_path: &Path, device: Device, activation: OutputActivation) -> Result<Self> {
        let session = build_session(model_path, &device)?;
        let name = model_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("onnx")
            .to_string();

        debug!(model = %name, device = device.name(), "onnx session ready");
        Ok(Self {
            session: Mutex::new(session),
            name,
            activation,
            device,
        })
    }

    pub fn device(&self) -> Device {
        self.device
    }

    /// Run the ONNX session and return the first output row.
    fn run_inference(&self, tensor: &ImageTensor) -> Result<Vec<f32>> {
        let data = tensor.as_contiguous()?;
        let input = TensorRef::from_array_view((tensor.shape(), data)).map_err(|e| {
            ThyraError::Inference(format!("Failed to create input tensor: {}", e))
        })?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| ThyraError::Inference(format!("Failed to acquire session: {}", e)))?;

        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| ThyraError::Inference(format!("ONNX inference failed: {}", e)))?;

        // try_extract_tensor returns (&Shape, &[T])
        let (shape, scores) = outputs[0].try_extract_tensor::<f32>().map_err(|e| {
            ThyraError::Inference(format!("Failed to extract class scores: {}", e))
        })?;
        let dims: Vec<i64> = shape.iter().copied().collect();

        first_row(&dims, scores).map(<[f32]>::to_vec)
    }
}

impl ImageClassifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, tensor: &ImageTensor) -> Result<ProbabilityVector> {
        let row = self.run_inference(tensor)?;
        ProbabilityVector::from_model_output(&self.activation.apply(&row))
    }
}

/// Slice out batch row 0 of a `(batch, classes)` output.
fn first_row<'a>(dims: &[i64], scores: &'a [f32]) -> Result<&'a [f32]> {
    let classes = match dims {
        [batch, classes] if *batch >= 1 => *classes as usize,
        [classes] => *classes as usize,
        _ => {
            return Err(ThyraError::Inference(format!(
                "unexpected output shape {dims:?}"
            )));
        }
    };
    scores
        .get(..classes)
        .ok_or_else(|| ThyraError::Inference("output shorter than its shape".to_string()))
}

/// Build an ONNX session with the appropriate execution provider.
fn build_session(model_path: &Path, device: &Device) -> Result<Session> {
    let artifact = model_path.display().to_string();
    if !model_path.is_file() {
        return Err(ThyraError::model_unavailable(artifact, "model file not found"));
    }

    let unavailable = |reason: String| ThyraError::model_unavailable(&artifact, reason);

    let builder = Session::builder()
        .map_err(|e| unavailable(format!("Failed to create session builder: {}", e)))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| unavailable(format!("Failed to set optimization level: {}", e)))?;

    // Configure execution provider based on device
    let builder = match device {
        Device::Cpu => builder,
        #[cfg(feature = "cuda")]
        Device::Cuda { device_id } => {
            use ort::execution_providers::CUDAExecutionProvider;
            builder
                .with_execution_providers([
                    CUDAExecutionProvider::default()
                        .with_device_id(*device_id as i32)
                        .build(),
                ])
                .map_err(|e| unavailable(format!("Failed to configure CUDA: {}", e)))?
        }
    };

    builder
        .commit_from_file(model_path)
        .map_err(|e| unavailable(format!("Failed to load ONNX model: {}", e)))
}
