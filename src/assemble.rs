//! Probability vector → classification result.

use crate::model::LabelMapping;
use crate::types::{ClassificationResult, Label, ProbabilityVector};

/// Assemble the immutable result record for one analyzed image.
///
/// The predicted index is the arg-max with ties going to index 0; its label
/// comes from the loaded mapping. Per-class confidences are the mapped
/// probabilities on a percent scale.
pub fn assemble(probabilities: &ProbabilityVector, labels: &LabelMapping) -> ClassificationResult {
    let predicted_index = probabilities.argmax();
    let [first, _] = labels.classes();
    let predicted_label = labels.label_for(predicted_index).unwrap_or(first);

    let percent = |label: Label| {
        probabilities
            .get(labels.index_of(label))
            .unwrap_or_default()
            * 100.0
    };

    ClassificationResult::new(predicted_label, percent(Label::Benign), percent(Label::Malignant))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> LabelMapping {
        LabelMapping::from_classes(&["benign", "malignant"]).unwrap()
    }

    #[test]
    fn benign_scenario() {
        let result = assemble(&ProbabilityVector::new(0.92, 0.08), &standard());
        assert_eq!(result.predicted_label(), Label::Benign);
        assert!((result.confidence() - 92.0).abs() < 1e-9);
        assert!((result.benign_confidence() - 92.0).abs() < 1e-9);
        assert!((result.malignant_confidence() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn malignant_scenario() {
        let result = assemble(&ProbabilityVector::new(0.35, 0.65), &standard());
        assert_eq!(result.predicted_label(), Label::Malignant);
        assert!((result.confidence() - 65.0).abs() < 1e-9);
    }

    #[test]
    fn exact_tie_goes_to_index_zero() {
        let result = assemble(&ProbabilityVector::new(0.5, 0.5), &standard());
        assert_eq!(result.predicted_label(), Label::Benign);
        assert_eq!(result.confidence(), 50.0);
    }

    #[test]
    fn mapping_is_authoritative() {
        let reversed = LabelMapping::from_classes(&["malignant", "benign"]).unwrap();
        let result = assemble(&ProbabilityVector::new(0.8, 0.2), &reversed);
        assert_eq!(result.predicted_label(), Label::Malignant);
        assert!((result.malignant_confidence() - 80.0).abs() < 1e-9);
        assert!((result.benign_confidence() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn confidence_matches_max_over_grid() {
        for step in 0..=100 {
            let p0 = f64::from(step) / 100.0;
            let p1 = 1.0 - p0;
            let result = assemble(&ProbabilityVector::new(p0, p1), &standard());
            assert!((result.confidence() - 100.0 * p0.max(p1)).abs() < 1e-9);
            assert_eq!(result.predicted_label() == Label::Benign, p0 >= p1);
        }
    }
}
