//! Tests for loading label mappings and classifier artifacts from disk.

use std::io::Write;
use std::path::PathBuf;

use thyra::{ClassifierHandle, Label, LabelMapping, ModelConfig, ThyraError};

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[test]
fn loads_encoder_shaped_mapping() {
    let file = write_temp(r#"{"classes": ["benign", "malignant"]}"#);
    let mapping = LabelMapping::load(file.path()).unwrap();

    assert_eq!(mapping.classes(), [Label::Benign, Label::Malignant]);
    assert_eq!(mapping.label_for(0), Some(Label::Benign));
    assert_eq!(mapping.label_for(2), None);
}

#[test]
fn loads_reversed_bare_list() {
    let file = write_temp(r#"["Malignant", "Benign"]"#);
    let mapping = LabelMapping::load(file.path()).unwrap();

    assert_eq!(mapping.index_of(Label::Malignant), 0);
    assert_eq!(mapping.index_of(Label::Benign), 1);
}

#[test]
fn invalid_mapping_file_is_model_unavailable() {
    for content in [
        "not json",
        r#"["benign"]"#,
        r#"["benign", "benign"]"#,
        r#"["benign", "malignant", "indeterminate"]"#,
        r#"{"classes": ["cyst", "nodule"]}"#,
    ] {
        let file = write_temp(content);
        let err = LabelMapping::load(file.path()).unwrap_err();
        assert!(
            matches!(err, ThyraError::ModelUnavailable { .. }),
            "{content}: {err}"
        );
    }
}

#[test]
fn missing_model_is_model_unavailable() {
    let labels = write_temp(r#"["benign", "malignant"]"#);
    let config = ModelConfig {
        model_path: PathBuf::from("/nonexistent/cnn_thyroid_model.onnx"),
        labels_path: labels.path().to_path_buf(),
        ..Default::default()
    };

    let err = ClassifierHandle::load(&config).unwrap_err();
    assert!(matches!(err, ThyraError::ModelUnavailable { .. }));
    assert!(!err.is_user_correctable());
}
