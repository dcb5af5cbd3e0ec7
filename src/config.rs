//! Configuration loading for the `thyra` CLI.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.thyra/config.toml` (user)
//! 3. `/etc/thyra/config.toml` (system)
//!
//! Unlike an explicit path, the user and system files are optional: when
//! neither exists the built-in defaults apply.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{
    DEFAULT_LABELS_FILE, DEFAULT_MODEL_FILE, Device, ModelConfig, OutputActivation,
    default_model_dir,
};
use crate::{Result, ThyraError};

/// CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelSection,
    #[serde(default)]
    pub report: ReportSection,
}

/// Classifier artifacts and runtime.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelSection {
    /// ONNX model file. Relative paths resolve against `THYRA_MODEL_DIR`.
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
    /// Label mapping JSON. Relative paths resolve against `THYRA_MODEL_DIR`.
    #[serde(default = "default_labels_path")]
    pub labels: PathBuf,
    /// Device to use: "cpu" or "cuda" (default: "cpu").
    #[serde(default = "default_device")]
    pub device: String,
    /// "probabilities" (default) or "logits".
    #[serde(default)]
    pub output: OutputActivation,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            labels: default_labels_path(),
            device: default_device(),
            output: OutputActivation::default(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_FILE)
}

fn default_labels_path() -> PathBuf {
    PathBuf::from(DEFAULT_LABELS_FILE)
}

fn default_device() -> String {
    "cpu".to_string()
}

/// Report output.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSection {
    /// Directory reports are written to (default: current directory).
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided; must exist)
    /// 2. `~/.thyra/config.toml`
    /// 3. `/etc/thyra/config.toml`
    /// 4. Built-in defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ThyraError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            ThyraError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path, if any.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(ThyraError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".thyra").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/thyra/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// Classifier settings with relative paths resolved against the model
    /// directory.
    pub fn model_config(&self) -> Result<ModelConfig> {
        self.model_config_in(&default_model_dir())
    }

    pub fn model_config_in(&self, model_dir: &Path) -> Result<ModelConfig> {
        Ok(ModelConfig {
            model_path: model_dir.join(&self.model.path),
            labels_path: model_dir.join(&self.model.labels),
            device: Device::parse(&self.model.device)?,
            activation: self.model.output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.model.path, PathBuf::from("cnn_thyroid_model.onnx"));
        assert_eq!(config.model.labels, PathBuf::from("label_encoder.json"));
        assert_eq!(config.model.device, "cpu");
        assert_eq!(config.model.output, OutputActivation::Probabilities);
        assert_eq!(config.report.output_dir, PathBuf::from("."));
    }

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [report]
            output_dir = "/tmp/reports"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.report.output_dir, PathBuf::from("/tmp/reports"));
        // Defaults preserved
        assert_eq!(config.model.device, "cpu");
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [model]
            path = "/opt/thyra/model.onnx"
            labels = "classes.json"
            device = "cpu"
            output = "logits"

            [report]
            output_dir = "out"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.model.output, OutputActivation::Logits);

        let model = config.model_config_in(Path::new("/models")).unwrap();
        // Absolute paths are kept, relative ones join the model dir.
        assert_eq!(model.model_path, PathBuf::from("/opt/thyra/model.onnx"));
        assert_eq!(model.labels_path, PathBuf::from("/models/classes.json"));
        assert_eq!(model.device, Device::Cpu);
        assert_eq!(model.activation, OutputActivation::Logits);
    }

    #[test]
    fn unknown_device_is_rejected() {
        let config: Config = toml::from_str("[model]\ndevice = \"tpu\"").unwrap();
        let err = config.model_config_in(Path::new(".")).unwrap_err();
        assert!(matches!(err, ThyraError::Configuration(_)));
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = Config::load(Some(Path::new("/nonexistent/thyra.toml"))).unwrap_err();
        assert!(matches!(err, ThyraError::Configuration(_)));
    }

    #[test]
    fn load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[model]\npath = \"m.onnx\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.model.path, PathBuf::from("m.onnx"));
        assert_eq!(config.model.labels, PathBuf::from("label_encoder.json"));
    }

    #[test]
    fn malformed_file_is_a_configuration_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[model\npath = ").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ThyraError::Configuration(_)));
    }
}
