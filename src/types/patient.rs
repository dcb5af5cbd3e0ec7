//! Patient metadata supplied before report generation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ThyraError};

/// Free-form patient record.
///
/// Every field is optional; only `name` is required, and only when a report
/// is generated. Blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physician: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_notes: Option<String>,
}

impl PatientInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn patient_id(mut self, id: impl Into<String>) -> Self {
        self.patient_id = Some(id.into());
        self
    }

    pub fn age(mut self, age: impl Into<String>) -> Self {
        self.age = Some(age.into());
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn scan_date(mut self, date: NaiveDate) -> Self {
        self.scan_date = Some(date);
        self
    }

    pub fn physician(mut self, physician: impl Into<String>) -> Self {
        self.physician = Some(physician.into());
        self
    }

    pub fn clinical_notes(mut self, notes: impl Into<String>) -> Self {
        self.clinical_notes = Some(notes.into());
        self
    }

    /// Trimmed name, or `None` if missing or whitespace-only.
    pub fn display_name(&self) -> Option<&str> {
        present(&self.name)
    }

    /// The name, or `InvalidPatientInput` when it is missing or blank.
    pub fn require_name(&self) -> Result<&str> {
        self.display_name().ok_or_else(|| {
            ThyraError::InvalidPatientInput(
                "Please enter patient name to generate report.".to_string(),
            )
        })
    }

    pub fn display_patient_id(&self) -> Option<&str> {
        present(&self.patient_id)
    }

    pub fn display_age(&self) -> Option<&str> {
        present(&self.age)
    }

    pub fn display_gender(&self) -> Option<&str> {
        present(&self.gender)
    }

    pub fn display_physician(&self) -> Option<&str> {
        present(&self.physician)
    }

    pub fn display_clinical_notes(&self) -> Option<&str> {
        present(&self.clinical_notes)
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_refused() {
        let patient = PatientInfo::new("   \t").patient_id("P-1").age("42");
        let err = patient.require_name().unwrap_err();
        assert!(matches!(err, ThyraError::InvalidPatientInput(_)));
        assert!(err.is_user_correctable());
    }

    #[test]
    fn missing_name_is_refused() {
        assert!(PatientInfo::default().require_name().is_err());
    }

    #[test]
    fn name_is_trimmed() {
        let patient = PatientInfo::new("  Jane Doe ");
        assert_eq!(patient.require_name().unwrap(), "Jane Doe");
    }

    #[test]
    fn blank_optional_fields_read_as_absent() {
        let patient = PatientInfo::new("Jane").physician("  ").gender("Female");
        assert_eq!(patient.display_physician(), None);
        assert_eq!(patient.display_gender(), Some("Female"));
    }

    #[test]
    fn deserializes_partial_record() {
        let json = r#"{"name": "Jane", "scan_date": "2025-03-14"}"#;
        let patient: PatientInfo = serde_json::from_str(json).unwrap();
        assert_eq!(patient.display_name(), Some("Jane"));
        assert_eq!(patient.scan_date, NaiveDate::from_ymd_opt(2025, 3, 14));
        assert!(patient.age.is_none());
    }
}
