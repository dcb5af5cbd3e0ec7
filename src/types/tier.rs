//! Confidence tiers.
//!
//! Two fixed partitions of the percent scale are used by the report: the
//! five-level [`ConfidenceTier`] for table cells and narration, and the
//! three-level [`InterpretationBand`] that picks the interpretation text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete confidence label derived from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceTier {
    /// 90 and above.
    VeryHigh,
    /// 80 up to 90.
    High,
    /// 70 up to 80.
    Moderate,
    /// 60 up to 70.
    Fair,
    /// Below 60.
    Low,
}

impl ConfidenceTier {
    /// Map a percentage onto its tier. Lower bounds are inclusive.
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 90.0 {
            Self::VeryHigh
        } else if percent >= 80.0 {
            Self::High
        } else if percent >= 70.0 {
            Self::Moderate
        } else if percent >= 60.0 {
            Self::Fair
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Fair => "Fair",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse band selecting the clinical interpretation paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpretationBand {
    /// 90 and above.
    High,
    /// 70 up to 90.
    Moderate,
    /// Below 70.
    Low,
}

impl InterpretationBand {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 90.0 {
            Self::High
        } else if percent >= 70.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// One-line reliability message shown next to a result.
    pub fn message(&self) -> &'static str {
        match self {
            Self::High => "High Confidence - Very reliable prediction",
            Self::Moderate => "Moderate Confidence - Reasonably reliable",
            Self::Low => "Low Confidence - Consider additional analysis",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_inclusive_below() {
        assert_eq!(ConfidenceTier::from_percent(90.0), ConfidenceTier::VeryHigh);
        assert_eq!(ConfidenceTier::from_percent(89.999), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_percent(80.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_percent(79.999), ConfidenceTier::Moderate);
        assert_eq!(ConfidenceTier::from_percent(70.0), ConfidenceTier::Moderate);
        assert_eq!(ConfidenceTier::from_percent(69.999), ConfidenceTier::Fair);
        assert_eq!(ConfidenceTier::from_percent(60.0), ConfidenceTier::Fair);
        assert_eq!(ConfidenceTier::from_percent(59.999), ConfidenceTier::Low);
    }

    #[test]
    fn tier_covers_extremes() {
        assert_eq!(ConfidenceTier::from_percent(0.0), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_percent(100.0), ConfidenceTier::VeryHigh);
    }

    #[test]
    fn tier_labels() {
        assert_eq!(ConfidenceTier::VeryHigh.to_string(), "Very High");
        assert_eq!(ConfidenceTier::Fair.label(), "Fair");
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(InterpretationBand::from_percent(90.0), InterpretationBand::High);
        assert_eq!(InterpretationBand::from_percent(89.9), InterpretationBand::Moderate);
        assert_eq!(InterpretationBand::from_percent(70.0), InterpretationBand::Moderate);
        assert_eq!(InterpretationBand::from_percent(69.9), InterpretationBand::Low);
    }

    #[test]
    fn band_messages() {
        assert_eq!(
            InterpretationBand::from_percent(92.0).message(),
            "High Confidence - Very reliable prediction"
        );
        assert_eq!(
            InterpretationBand::from_percent(70.0).message(),
            "Moderate Confidence - Reasonably reliable"
        );
        assert_eq!(
            InterpretationBand::from_percent(69.9).message(),
            "Low Confidence - Consider additional analysis"
        );
    }
}
