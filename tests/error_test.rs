use thyra::{Result, ThyraError};

#[test]
fn test_error_display() {
    let err = ThyraError::model_unavailable("cnn_thyroid_model.onnx", "file not found");
    assert_eq!(
        err.to_string(),
        "model unavailable (cnn_thyroid_model.onnx): file not found"
    );
}

#[test]
fn test_result_alias() {
    fn returns_error() -> Result<()> {
        Err(ThyraError::Rendering("no pages".to_string()))
    }
    assert!(returns_error().is_err());
}

// ============================================================================
// User-correctable classification
// ============================================================================

#[test]
fn user_correctable_errors() {
    assert!(ThyraError::InvalidPatientInput("blank name".into()).is_user_correctable());
    assert!(ThyraError::ImageDecode("truncated".into()).is_user_correctable());
}

#[test]
fn terminal_and_internal_errors_are_not_user_correctable() {
    assert!(!ThyraError::model_unavailable("labels", "missing").is_user_correctable());
    assert!(!ThyraError::Inference("bad shape".into()).is_user_correctable());
    assert!(!ThyraError::Rendering("font".into()).is_user_correctable());
    assert!(!ThyraError::Configuration("bad toml".into()).is_user_correctable());
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn image_errors_become_decode_errors() {
    let err: ThyraError = image::load_from_memory(b"\x89PNG\r\n\x1a\nbroken")
        .unwrap_err()
        .into();
    assert!(matches!(err, ThyraError::ImageDecode(_)));
}

#[test]
fn json_errors_convert() {
    let err: ThyraError = serde_json::from_str::<Vec<String>>("{").unwrap_err().into();
    assert!(matches!(err, ThyraError::Json(_)));
    assert!(err.to_string().starts_with("JSON error"));
}
