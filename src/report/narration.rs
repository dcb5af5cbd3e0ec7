//! Spoken-style summary text for the text-to-speech widget.

use crate::types::{ClassificationResult, ConfidenceTier, Label};

const RESEARCH_ONLY: &str = "Please remember that this analysis is intended for research and educational purposes only and is not a substitute for professional medical diagnosis.";

/// Build the narration paragraph for a result.
///
/// Sentence order: opening, label and its meaning, confidence, tier
/// qualifier, research-only disclaimer, label-dependent closing action.
pub fn render_narration(result: &ClassificationResult, patient_name: Option<&str>) -> String {
    let label = result.predicted_label();
    let opening = match patient_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("Analysis complete for {name}."),
        None => "Analysis complete.".to_string(),
    };

    let sentences = [
        opening,
        format!(
            "The thyroid nodule has been classified as {label}, which means it appears to be {}.",
            label.meaning()
        ),
        format!(
            "The model is {:.1} percent confident in this result.",
            result.confidence()
        ),
        tier_qualifier(ConfidenceTier::from_percent(result.confidence())).to_string(),
        RESEARCH_ONLY.to_string(),
        closing(label).to_string(),
    ];
    sentences.join(" ")
}

fn tier_qualifier(tier: ConfidenceTier) -> &'static str {
    match tier {
        ConfidenceTier::VeryHigh => "This is a very high confidence prediction.",
        ConfidenceTier::High => "This is a high confidence prediction.",
        ConfidenceTier::Moderate => {
            "This is a moderate confidence prediction, so additional clinical evaluation may be helpful."
        }
        ConfidenceTier::Fair => {
            "This is a fair confidence prediction, and further evaluation is advised."
        }
        ConfidenceTier::Low => {
            "This is a low confidence prediction, and expert review is strongly recommended."
        }
    }
}

fn closing(label: Label) -> &'static str {
    match label {
        Label::Malignant => {
            "Please arrange an urgent consultation with a specialist to discuss further evaluation."
        }
        Label::Benign => {
            "Routine monitoring with your healthcare provider is recommended."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benign_narration() {
        let result = ClassificationResult::new(Label::Benign, 92.0, 8.0);
        let text = render_narration(&result, Some("Jane Doe"));

        assert!(text.starts_with("Analysis complete for Jane Doe."));
        assert!(text.contains("classified as benign"));
        assert!(text.contains("non-cancerous"));
        assert!(text.contains("92.0 percent"));
        assert!(text.contains("very high confidence"));
        assert!(text.contains("research and educational purposes only"));
        assert!(text.ends_with("Routine monitoring with your healthcare provider is recommended."));
    }

    #[test]
    fn malignant_narration_without_name() {
        let result = ClassificationResult::new(Label::Malignant, 35.0, 65.0);
        let text = render_narration(&result, Some("  "));

        assert!(text.starts_with("Analysis complete. "));
        assert!(text.contains("potentially cancerous"));
        assert!(text.contains("65.0 percent"));
        assert!(text.contains("fair confidence"));
        assert!(text.contains("urgent consultation"));
    }

    #[test]
    fn narration_is_deterministic() {
        let result = ClassificationResult::new(Label::Benign, 75.0, 25.0);
        assert_eq!(
            render_narration(&result, None),
            render_narration(&result, None)
        );
    }
}
