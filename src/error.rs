//! Thyra error types

/// Thyra error types
#[derive(Debug, thiserror::Error)]
pub enum ThyraError {
    // Startup errors
    /// The classifier or its label mapping could not be loaded.
    ///
    /// Terminal for the process: analysis stays disabled and is not retried.
    #[error("model unavailable ({artifact}): {reason}")]
    ModelUnavailable { artifact: String, reason: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    // Input errors
    #[error("invalid patient input: {0}")]
    InvalidPatientInput(String),

    #[error("image decode error: {0}")]
    ImageDecode(String),

    // Runtime errors
    #[error("inference error: {0}")]
    Inference(String),

    #[error("rendering failed: {0}")]
    Rendering(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ThyraError {
    /// Build a `ModelUnavailable` for the named artifact.
    pub fn model_unavailable(artifact: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            artifact: artifact.into(),
            reason: reason.into(),
        }
    }

    /// Whether the user can fix this by changing their input and trying again.
    ///
    /// Everything else is either terminal (`ModelUnavailable`) or a failure
    /// the caller reports as-is.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::InvalidPatientInput(_) | Self::ImageDecode(_))
    }
}

impl From<image::ImageError> for ThyraError {
    fn from(err: image::ImageError) -> Self {
        ThyraError::ImageDecode(err.to_string())
    }
}

/// Result type alias for Thyra operations
pub type Result<T> = std::result::Result<T, ThyraError>;
