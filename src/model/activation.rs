//! Interpretation of the classifier's raw output row.

use serde::{Deserialize, Serialize};

/// What the model's final layer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputActivation {
    /// Already softmaxed (a Keras `Dense(2, activation="softmax")` head).
    #[default]
    Probabilities,
    /// Raw logits; softmax is applied here.
    Logits,
}

impl OutputActivation {
    pub fn apply(&self, row: &[f32]) -> Vec<f32> {
        match self {
            Self::Probabilities => row.to_vec(),
            Self::Logits => softmax(row),
        }
    }
}

/// Softmax function.
pub(crate) fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|x| x / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax() {
        let probs = softmax(&[1.0, 3.0]);

        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(probs[1] > probs[0]);
    }

    #[test]
    fn probabilities_pass_through() {
        let row = [0.92, 0.08];
        assert_eq!(OutputActivation::Probabilities.apply(&row), vec![0.92, 0.08]);
    }

    #[test]
    fn logits_are_normalized() {
        let probs = OutputActivation::Logits.apply(&[0.0, 0.0]);
        assert_eq!(probs, vec![0.5, 0.5]);
    }
}
