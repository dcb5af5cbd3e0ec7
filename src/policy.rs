//! Clinical recommendation policy.
//!
//! A stateless lookup on `(predicted_label, confidence)`:
//!
//! | Condition                          | Set                   |
//! |------------------------------------|-----------------------|
//! | benign and confidence ≥ 80         | `RoutineMonitoring`   |
//! | malignant or confidence < 70       | `Urgent`              |
//! | benign and 70 ≤ confidence < 80    | `ClinicalCorrelation` |

use serde::Serialize;

use crate::types::{ClassificationResult, Label};

/// Which fixed list of recommendations applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSet {
    RoutineMonitoring,
    Urgent,
    ClinicalCorrelation,
}

const ROUTINE_MONITORING: &[&str] = &[
    "Continue routine clinical monitoring as per institutional guidelines",
    "Schedule follow-up ultrasound imaging at appropriate intervals",
    "Patient counseling regarding benign nature of findings",
    "Document findings in patient medical record",
    "Consider discharge to primary care for ongoing monitoring",
];

const URGENT: &[&str] = &[
    "URGENT: Immediate specialist endocrinology consultation",
    "Consider fine needle aspiration (FNA) biopsy",
    "Evaluate for additional imaging studies (CT, MRI if indicated)",
    "Multidisciplinary team discussion recommended",
    "Patient counseling regarding findings and next steps",
    "Expedited scheduling for follow-up procedures",
];

const CLINICAL_CORRELATION: &[&str] = &[
    "Clinical correlation with patient history and physical examination",
    "Follow institutional protocols for thyroid nodule management",
    "Consider repeat imaging if clinically indicated",
    "Specialist consultation may be beneficial",
    "Document findings and recommendations clearly",
];

impl RecommendationSet {
    /// Select the set for a label and overall confidence (percent).
    pub fn select(label: Label, confidence: f64) -> Self {
        if label == Label::Benign && confidence >= 80.0 {
            Self::RoutineMonitoring
        } else if label == Label::Malignant || confidence < 70.0 {
            Self::Urgent
        } else {
            Self::ClinicalCorrelation
        }
    }

    pub fn for_result(result: &ClassificationResult) -> Self {
        Self::select(result.predicted_label(), result.confidence())
    }

    /// The recommendation texts, in report order.
    pub fn items(&self) -> &'static [&'static str] {
        match self {
            Self::RoutineMonitoring => ROUTINE_MONITORING,
            Self::Urgent => URGENT,
            Self::ClinicalCorrelation => CLINICAL_CORRELATION,
        }
    }
}
