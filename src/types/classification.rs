//! Classification result types.
//!
//! A classification runs once per analyzed image and produces a
//! [`ClassificationResult`] that every downstream consumer (charts, report,
//! narration) reads. The record is never mutated after assembly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThyraError};

/// The two classes the classifier distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Non-cancerous nodule.
    Benign,
    /// Potentially cancerous nodule.
    Malignant,
}

impl Label {
    /// Lowercase class name as it appears in the label mapping.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Benign => "benign",
            Self::Malignant => "malignant",
        }
    }

    /// Plain-language meaning of the class.
    pub fn meaning(&self) -> &'static str {
        match self {
            Self::Benign => "non-cancerous",
            Self::Malignant => "potentially cancerous",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = ThyraError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "benign" => Ok(Self::Benign),
            "malignant" => Ok(Self::Malignant),
            other => Err(ThyraError::Configuration(format!(
                "unknown class label '{other}'"
            ))),
        }
    }
}

/// Per-class probabilities in classifier output order.
///
/// Index semantics come from the label mapping, not from this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityVector([f64; 2]);

impl ProbabilityVector {
    /// Wrap a probability pair given in output order.
    pub fn new(first: f64, second: f64) -> Self {
        Self([first, second])
    }

    /// Convert a raw model output row.
    ///
    /// Rejects anything that is not exactly two finite, non-negative values.
    /// Values are not renormalized.
    pub fn from_model_output(values: &[f32]) -> Result<Self> {
        let [first, second] = values else {
            return Err(ThyraError::Inference(format!(
                "expected 2 class scores, got {}",
                values.len()
            )));
        };
        for v in [first, second] {
            if !v.is_finite() || *v < 0.0 {
                return Err(ThyraError::Inference(format!(
                    "class score out of range: {v}"
                )));
            }
        }
        Ok(Self([f64::from(*first), f64::from(*second)]))
    }

    /// Probability at the given output index.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Index of the largest probability; ties resolve to the lowest index.
    pub fn argmax(&self) -> usize {
        if self.0[1] > self.0[0] { 1 } else { 0 }
    }

    pub fn as_array(&self) -> [f64; 2] {
        self.0
    }
}

/// Immutable outcome of one image analysis.
///
/// All confidences are on a percent scale (0 to 100). Deserialized records
/// are checked with [`ClassificationResult::validate`] before they exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawClassificationResult")]
pub struct ClassificationResult {
    predicted_label: Label,
    confidence: f64,
    benign_confidence: f64,
    malignant_confidence: f64,
}

impl ClassificationResult {
    /// Build a result from per-class percentages.
    ///
    /// `confidence` is derived as the larger of the two so the record can
    /// never disagree with itself.
    pub(crate) fn new(predicted_label: Label, benign_confidence: f64, malignant_confidence: f64) -> Self {
        Self {
            predicted_label,
            confidence: benign_confidence.max(malignant_confidence),
            benign_confidence,
            malignant_confidence,
        }
    }

    pub fn predicted_label(&self) -> Label {
        self.predicted_label
    }

    /// Overall confidence: `max(benign_confidence, malignant_confidence)`.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn benign_confidence(&self) -> f64 {
        self.benign_confidence
    }

    pub fn malignant_confidence(&self) -> f64 {
        self.malignant_confidence
    }

    /// Percentage for a specific class.
    pub fn confidence_for(&self, label: Label) -> f64 {
        match label {
            Label::Benign => self.benign_confidence,
            Label::Malignant => self.malignant_confidence,
        }
    }

    pub fn is_malignant(&self) -> bool {
        self.predicted_label == Label::Malignant
    }

    /// Check that the record agrees with itself.
    ///
    /// Every value is a finite percentage, `confidence` equals the larger
    /// class value, and the label names the larger class (either label on
    /// an exact tie).
    pub fn validate(&self) -> Result<()> {
        let values = [
            self.confidence,
            self.benign_confidence,
            self.malignant_confidence,
        ];
        if values
            .iter()
            .any(|v| !v.is_finite() || !(0.0..=100.0 + EPSILON).contains(v))
        {
            return Err(ThyraError::Rendering(format!(
                "confidence values out of range: {values:?}"
            )));
        }

        let larger = self.benign_confidence.max(self.malignant_confidence);
        if (self.confidence - larger).abs() > EPSILON {
            return Err(ThyraError::Rendering(format!(
                "confidence {} is not the larger class value {larger}",
                self.confidence
            )));
        }
        if self.confidence_for(self.predicted_label) + EPSILON < larger {
            return Err(ThyraError::Rendering(format!(
                "label {} disagrees with class values (benign {}, malignant {})",
                self.predicted_label, self.benign_confidence, self.malignant_confidence
            )));
        }
        Ok(())
    }
}

/// Tolerance for percent comparisons.
const EPSILON: f64 = 1e-6;

/// Wire shape of [`ClassificationResult`], validated on conversion.
#[derive(Deserialize)]
struct RawClassificationResult {
    predicted_label: Label,
    confidence: f64,
    benign_confidence: f64,
    malignant_confidence: f64,
}

impl TryFrom<RawClassificationResult> for ClassificationResult {
    type Error = ThyraError;

    fn try_from(raw: RawClassificationResult) -> Result<Self> {
        let result = Self {
            predicted_label: raw.predicted_label,
            confidence: raw.confidence,
            benign_confidence: raw.benign_confidence,
            malignant_confidence: raw.malignant_confidence,
        };
        result.validate()?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_parses_case_insensitively() {
        assert_eq!(" Benign ".parse::<Label>().unwrap(), Label::Benign);
        assert_eq!("MALIGNANT".parse::<Label>().unwrap(), Label::Malignant);
        assert!("cyst".parse::<Label>().is_err());
    }

    #[test]
    fn label_serializes_lowercase() {
        let json = serde_json::to_string(&Label::Malignant).unwrap();
        assert_eq!(json, "\"malignant\"");
    }

    #[test]
    fn argmax_prefers_lowest_index_on_tie() {
        assert_eq!(ProbabilityVector::new(0.5, 0.5).argmax(), 0);
        assert_eq!(ProbabilityVector::new(0.4, 0.6).argmax(), 1);
        assert_eq!(ProbabilityVector::new(0.7, 0.3).argmax(), 0);
    }

    #[test]
    fn model_output_must_have_two_scores() {
        assert!(ProbabilityVector::from_model_output(&[0.2, 0.3, 0.5]).is_err());
        assert!(ProbabilityVector::from_model_output(&[1.0]).is_err());
        let pv = ProbabilityVector::from_model_output(&[0.25, 0.75]).unwrap();
        assert_eq!(pv.as_array(), [0.25, 0.75]);
    }

    #[test]
    fn model_output_rejects_nan() {
        let err = ProbabilityVector::from_model_output(&[f32::NAN, 0.5]).unwrap_err();
        assert!(matches!(err, ThyraError::Inference(_)));
    }

    #[test]
    fn confidence_is_max_of_classes() {
        let result = ClassificationResult::new(Label::Malignant, 35.0, 65.0);
        assert_eq!(result.confidence(), 65.0);
        assert_eq!(result.confidence_for(Label::Benign), 35.0);
        assert!(result.is_malignant());
    }

    #[test]
    fn validate_accepts_assembled_records_and_ties() {
        assert!(ClassificationResult::new(Label::Benign, 92.0, 8.0).validate().is_ok());
        assert!(ClassificationResult::new(Label::Malignant, 50.0, 50.0).validate().is_ok());
        assert!(ClassificationResult::new(Label::Benign, 50.0, 50.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_self_contradicting_records() {
        let wrong_confidence = ClassificationResult {
            predicted_label: Label::Malignant,
            confidence: 10.0,
            benign_confidence: 5.0,
            malignant_confidence: 95.0,
        };
        let wrong_label = ClassificationResult::new(Label::Benign, 5.0, 95.0);
        let out_of_range = ClassificationResult::new(Label::Malignant, 20.0, 120.0);

        for result in [wrong_confidence, wrong_label, out_of_range] {
            let err = result.validate().unwrap_err();
            assert!(matches!(err, ThyraError::Rendering(_)), "{err}");
        }
    }

    #[test]
    fn deserialization_enforces_the_invariant() {
        let json = r#"{"predicted_label":"benign","confidence":10.0,"benign_confidence":5.0,"malignant_confidence":95.0}"#;
        assert!(serde_json::from_str::<ClassificationResult>(json).is_err());

        let good = ClassificationResult::new(Label::Malignant, 35.0, 65.0);
        let json = serde_json::to_string(&good).unwrap();
        let back: ClassificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, good);
    }
}
