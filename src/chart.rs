//! Chart data for the results view.
//!
//! Plain serializable values; the UI host feeds them to its charting
//! library. Nothing here draws.

use serde::Serialize;

use crate::types::{ClassificationResult, Label};

/// Reference value the gauge delta is measured against.
pub const BASELINE: f64 = 50.0;
/// Threshold marker on each gauge.
pub const THRESHOLD: f64 = 90.0;

const ACCENT: &str = "#FF8C00";
const MALIGNANT_BAR: &str = "#dc3545";
const STEP_LOW: &str = "#333333";
const BENIGN_STEP_HIGH: &str = "#FFE4B5";
const MALIGNANT_STEP_HIGH: &str = "#f8d7da";

/// Colored range on a gauge axis, `[from, to)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeStep {
    pub from: f64,
    pub to: f64,
    pub color: &'static str,
}

/// One gauge indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    pub title: &'static str,
    pub value: f64,
    pub reference: f64,
    pub delta: f64,
    pub bar_color: &'static str,
    pub threshold: f64,
    pub threshold_color: &'static str,
    pub steps: [GaugeStep; 2],
}

impl Gauge {
    fn for_label(label: Label, value: f64) -> Self {
        let (title, bar_color, step_high) = match label {
            Label::Benign => ("Benign", ACCENT, BENIGN_STEP_HIGH),
            Label::Malignant => ("Malignant", MALIGNANT_BAR, MALIGNANT_STEP_HIGH),
        };
        Self {
            title,
            value,
            reference: BASELINE,
            delta: value - BASELINE,
            bar_color,
            threshold: THRESHOLD,
            threshold_color: ACCENT,
            steps: [
                GaugeStep {
                    from: 0.0,
                    to: BASELINE,
                    color: STEP_LOW,
                },
                GaugeStep {
                    from: BASELINE,
                    to: 100.0,
                    color: step_high,
                },
            ],
        }
    }
}

/// Labeled value tile shown under the gauges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTile {
    pub label: &'static str,
    pub value: String,
    pub delta: String,
}

/// Both gauges and the metric tiles for one result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceChart {
    pub benign: Gauge,
    pub malignant: Gauge,
    pub metrics: [MetricTile; 3],
}

impl ConfidenceChart {
    pub fn from_result(result: &ClassificationResult) -> Self {
        let benign = result.benign_confidence();
        let malignant = result.malignant_confidence();
        Self {
            benign: Gauge::for_label(Label::Benign, benign),
            malignant: Gauge::for_label(Label::Malignant, malignant),
            metrics: [
                MetricTile {
                    label: "Benign Probability",
                    value: format!("{benign:.2}%"),
                    delta: format!("{:+.1}% vs baseline", benign - BASELINE),
                },
                MetricTile {
                    label: "Malignant Probability",
                    value: format!("{malignant:.2}%"),
                    delta: format!("{:+.1}% vs baseline", malignant - BASELINE),
                },
                MetricTile {
                    label: "Confidence Level",
                    value: format!("{:.1}%", result.confidence()),
                    delta: "Prediction strength".to_string(),
                },
            ],
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauges_track_confidences() {
        let result = ClassificationResult::new(Label::Malignant, 35.0, 65.0);
        let chart = ConfidenceChart::from_result(&result);

        assert_eq!(chart.benign.value, 35.0);
        assert_eq!(chart.benign.delta, -15.0);
        assert_eq!(chart.benign.bar_color, "#FF8C00");
        assert_eq!(chart.malignant.value, 65.0);
        assert_eq!(chart.malignant.delta, 15.0);
        assert_eq!(chart.malignant.bar_color, "#dc3545");
        assert_eq!(chart.malignant.threshold, 90.0);
        assert_eq!(chart.malignant.steps[0].to, 50.0);
        assert_eq!(chart.malignant.steps[1].to, 100.0);
    }

    #[test]
    fn metric_tiles_are_formatted() {
        let result = ClassificationResult::new(Label::Benign, 92.0, 8.0);
        let chart = ConfidenceChart::from_result(&result);

        assert_eq!(chart.metrics[0].value, "92.00%");
        assert_eq!(chart.metrics[0].delta, "+42.0% vs baseline");
        assert_eq!(chart.metrics[1].value, "8.00%");
        assert_eq!(chart.metrics[1].delta, "-42.0% vs baseline");
        assert_eq!(chart.metrics[2].value, "92.0%");
    }

    #[test]
    fn serializes_to_json() {
        let result = ClassificationResult::new(Label::Benign, 92.0, 8.0);
        let json: serde_json::Value =
            serde_json::from_str(&ConfidenceChart::from_result(&result).to_json().unwrap())
                .unwrap();

        assert_eq!(json["benign"]["title"], "Benign");
        assert_eq!(json["metrics"][2]["label"], "Confidence Level");
        assert_eq!(json["malignant"]["steps"][1]["color"], "#f8d7da");
    }
}
