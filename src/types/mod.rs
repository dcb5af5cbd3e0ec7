//! Public types for the Thyra API.

mod classification;
mod patient;
mod tier;

pub use classification::{ClassificationResult, Label, ProbabilityVector};
pub use patient::PatientInfo;
pub use tier::{ConfidenceTier, InterpretationBand};
