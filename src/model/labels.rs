//! Label mapping: classifier output index → class label.
//!
//! The mapping is an external artifact saved alongside the model, in the
//! class order the label encoder was fitted with. It is loaded verbatim and
//! never re-derived. Two JSON shapes are accepted:
//!
//! ```json
//! {"classes": ["benign", "malignant"]}
//! ```
//!
//! or a bare list `["benign", "malignant"]`.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, ThyraError};
use crate::types::Label;

/// On-disk payload shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMapping {
    Encoder { classes: Vec<String> },
    List(Vec<String>),
}

impl RawMapping {
    fn into_classes(self) -> Vec<String> {
        match self {
            Self::Encoder { classes } => classes,
            Self::List(classes) => classes,
        }
    }
}

/// Validated two-class mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMapping {
    classes: [Label; 2],
}

impl LabelMapping {
    /// Build a mapping from class names in output order.
    ///
    /// Requires exactly two distinct names, each naming benign or malignant.
    pub fn from_classes<S: AsRef<str>>(classes: &[S]) -> Result<Self> {
        let [first, second] = classes else {
            return Err(ThyraError::Configuration(format!(
                "label mapping must list exactly 2 classes, found {}",
                classes.len()
            )));
        };
        let first: Label = first.as_ref().parse()?;
        let second: Label = second.as_ref().parse()?;
        if first == second {
            return Err(ThyraError::Configuration(format!(
                "label mapping lists '{first}' twice"
            )));
        }
        Ok(Self {
            classes: [first, second],
        })
    }

    /// Parse a JSON mapping payload.
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: RawMapping = serde_json::from_str(content)?;
        Self::from_classes(&raw.into_classes())
    }

    /// Load the mapping file. Any failure is `ModelUnavailable`.
    pub fn load(path: &Path) -> Result<Self> {
        let artifact = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ThyraError::model_unavailable(&artifact, format!("failed to read: {e}")))?;
        let mapping = Self::from_json(&content)
            .map_err(|e| ThyraError::model_unavailable(&artifact, e.to_string()))?;
        debug!(path = %artifact, classes = ?mapping.classes, "loaded label mapping");
        Ok(mapping)
    }

    /// Label at a classifier output index.
    pub fn label_for(&self, index: usize) -> Option<Label> {
        self.classes.get(index).copied()
    }

    /// Output index that carries the given label.
    pub fn index_of(&self, label: Label) -> usize {
        if self.classes[0] == label { 0 } else { 1 }
    }

    pub fn classes(&self) -> [Label; 2] {
        self.classes
    }
}
