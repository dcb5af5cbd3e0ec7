//! Report content: classification result + patient record → [`Document`].

use chrono::{DateTime, FixedOffset, Local};

use crate::error::Result;
use crate::policy::RecommendationSet;
use crate::report::{Document, Section, Tone};
use crate::types::{ClassificationResult, ConfidenceTier, InterpretationBand, Label, PatientInfo};

pub const REPORT_TITLE: &str = "AI THYROID NODULE ANALYSIS REPORT";
pub const REPORT_SUBTITLE: &str = "Comprehensive Diagnostic Assessment";
pub const MODEL_VERSION: &str = "CNN Deep Learning v2.1";
pub const ANALYSIS_TYPE: &str = "Binary Classification (Benign/Malignant)";
pub const EXAMINATION_TYPE: &str = "Thyroid Ultrasound Analysis";

pub const HEADING_REPORT_INFO: &str = "REPORT INFORMATION";
pub const HEADING_PATIENT: &str = "PATIENT INFORMATION";
pub const HEADING_RESULTS: &str = "AI ANALYSIS RESULTS";
pub const HEADING_TECHNICAL: &str = "TECHNICAL ANALYSIS DETAILS";
pub const HEADING_INTERPRETATION: &str = "CLINICAL INTERPRETATION";
pub const HEADING_RECOMMENDATIONS: &str = "CLINICAL RECOMMENDATIONS";
pub const HEADING_QUALITY: &str = "QUALITY ASSURANCE";
pub const HEADING_DISCLAIMER: &str = "IMPORTANT MEDICAL DISCLAIMER";

const NOT_PROVIDED: &str = "Not Provided";
const NOT_ASSIGNED: &str = "Not Assigned";
const NOT_SPECIFIED: &str = "Not Specified";

const TECHNICAL_DETAILS: &[(&str, &str)] = &[
    ("Model Architecture:", "Convolutional Neural Network (CNN)"),
    ("Input Preprocessing:", "Image resized to 128x128 pixels, normalized to [0,1] range"),
    ("Feature Extraction:", "Multi-layer convolutional feature extraction"),
    ("Classification Method:", "Binary classification with softmax activation"),
    ("Training Dataset:", "Thousands of validated thyroid ultrasound images"),
    ("Model Performance:", "Optimized for medical image analysis"),
    ("Processing Time:", "Real-time analysis (< 2 seconds)"),
];

const QUALITY_CHECKS: &[(&str, &str)] = &[
    ("Image Quality Assessment:", "Processed successfully"),
    ("Model Validation:", "Algorithm functioning within normal parameters"),
    ("Processing Verification:", "All preprocessing steps completed successfully"),
    ("Output Validation:", "Results within expected confidence ranges"),
    ("System Check:", "All diagnostic modules operational"),
];

const DISCLAIMER_INTRO: &str = "CRITICAL NOTICE - PLEASE READ CAREFULLY:";

const DISCLAIMER: &[&str] = &[
    "1. RESEARCH AND EDUCATIONAL PURPOSE ONLY: This AI-generated analysis is developed and provided exclusively for research, educational, and academic purposes. It is NOT intended for clinical decision-making in patient care.",
    "2. NOT A SUBSTITUTE FOR PROFESSIONAL MEDICAL JUDGMENT: This report does NOT replace professional medical diagnosis, clinical judgment, or expert radiological interpretation. All findings must be evaluated by qualified healthcare professionals.",
    "3. LIMITATIONS OF AI ANALYSIS: Artificial intelligence models have inherent limitations and may not detect all pathological conditions. False positives and false negatives are possible. Image quality, patient factors, and technical limitations can affect results.",
    "4. CLINICAL CORRELATION ESSENTIAL: Results must be interpreted in conjunction with complete clinical history, physical examination, laboratory findings, and other diagnostic information.",
    "5. REGULATORY STATUS: This AI system is not FDA-approved for clinical diagnostic use. It is an investigational tool for research purposes only.",
    "6. LIABILITY LIMITATION: The developers, institution, and associated personnel assume no responsibility for clinical decisions based on this analysis. Users assume full responsibility for appropriate use and interpretation.",
    "7. DATA PRIVACY: Ensure patient data is handled in compliance with applicable privacy laws and institutional policies.",
];

/// Column weights of the confidence breakdown table (inches in the printed layout).
const BREAKDOWN_WIDTHS: [f32; 4] = [1.5, 1.0, 1.2, 2.3];

/// Report identifier for a generation time: `THY-AI-<unix seconds>`.
pub fn report_id(generated_at: &DateTime<FixedOffset>) -> String {
    format!("THY-AI-{}", generated_at.timestamp())
}

/// Build the report document, stamped with the current local time.
pub fn render_document(patient: &PatientInfo, result: &ClassificationResult) -> Result<Document> {
    render_document_at(patient, result, Local::now().fixed_offset())
}

/// Build the report document for a fixed generation time.
///
/// Refuses with `InvalidPatientInput` when the patient name is blank, and
/// with `Rendering` when the result record is malformed.
pub fn render_document_at(
    patient: &PatientInfo,
    result: &ClassificationResult,
    generated_at: DateTime<FixedOffset>,
) -> Result<Document> {
    let name = patient.require_name()?;
    check_result(result)?;

    let report_id = report_id(&generated_at);
    let mut sections = Vec::with_capacity(32);

    sections.push(Section::Title {
        title: REPORT_TITLE.to_string(),
        subtitle: REPORT_SUBTITLE.to_string(),
    });

    sections.push(Section::heading(HEADING_REPORT_INFO));
    sections.push(Section::key_value([
        (
            "Report Generated:".to_string(),
            generated_at.format("%A, %B %d, %Y at %I:%M %p").to_string(),
        ),
        ("Report ID:".to_string(), report_id.clone()),
        ("AI Model Version:".to_string(), MODEL_VERSION.to_string()),
        ("Analysis Type:".to_string(), ANALYSIS_TYPE.to_string()),
    ]));

    sections.push(Section::heading(HEADING_PATIENT));
    sections.push(patient_table(name, patient));

    sections.push(Section::heading(HEADING_RESULTS));
    sections.push(Section::Paragraph {
        text: format!(
            "CLASSIFICATION: {}\nCONFIDENCE LEVEL: {:.1}%",
            headline(result.predicted_label()),
            result.confidence()
        ),
        tone: label_tone(result.predicted_label()),
        strong: true,
    });
    sections.push(breakdown_table(result));

    sections.push(Section::heading(HEADING_TECHNICAL));
    sections.push(Section::key_value(TECHNICAL_DETAILS.iter().copied()));

    sections.push(Section::heading(HEADING_INTERPRETATION));
    sections.push(Section::paragraph(interpretation(result.confidence())));

    sections.push(Section::heading(HEADING_RECOMMENDATIONS));
    sections.push(Section::NumberedList {
        items: RecommendationSet::for_result(result)
            .items()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    });

    sections.push(Section::heading(HEADING_QUALITY));
    let mut checks: Vec<(String, String)> = QUALITY_CHECKS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    checks.push((
        "Report Generation:".to_string(),
        generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ));
    sections.push(Section::KeyValue { rows: checks });

    sections.push(Section::PageBreak);
    sections.push(Section::Heading {
        text: HEADING_DISCLAIMER.to_string(),
        tone: Tone::Alert,
    });
    sections.push(Section::paragraph(DISCLAIMER_INTRO));
    sections.extend(DISCLAIMER.iter().map(|p| Section::paragraph(*p)));

    Ok(Document {
        title: REPORT_TITLE.to_string(),
        report_id,
        generated_at,
        sections,
    })
}

/// Headline wording for a label.
pub fn headline(label: Label) -> &'static str {
    match label {
        Label::Benign => "BENIGN (NON-CANCEROUS)",
        Label::Malignant => "MALIGNANT (POTENTIALLY CANCEROUS)",
    }
}

pub fn label_tone(label: Label) -> Tone {
    match label {
        Label::Benign => Tone::Positive,
        Label::Malignant => Tone::Alert,
    }
}

/// Interpretation paragraph for an overall confidence.
pub fn interpretation(confidence: f64) -> &'static str {
    match InterpretationBand::from_percent(confidence) {
        InterpretationBand::High => {
            "High Confidence Prediction (≥90%): The AI model demonstrates strong certainty in this classification. The extracted features strongly align with the predicted category. This level of confidence suggests a reliable preliminary assessment, though clinical correlation remains essential."
        }
        InterpretationBand::Moderate => {
            "Moderate Confidence Prediction (70-89%): The AI model shows reasonable certainty in this classification. While the prediction is reliable, additional clinical evaluation and possibly alternative imaging modalities may provide valuable complementary information."
        }
        InterpretationBand::Low => {
            "Low Confidence Prediction (<70%): The AI model shows uncertainty in this classification. This may be due to image quality, atypical features, or borderline characteristics. Strong recommendation for additional clinical evaluation and expert consultation."
        }
    }
}

fn patient_table(name: &str, patient: &PatientInfo) -> Section {
    let or = |value: Option<&str>, placeholder: &str| value.unwrap_or(placeholder).to_string();

    Section::key_value([
        ("Patient Name:".to_string(), name.to_string()),
        ("Patient ID:".to_string(), or(patient.display_patient_id(), NOT_ASSIGNED)),
        (
            "Age:".to_string(),
            patient
                .display_age()
                .map(|age| format!("{age} years"))
                .unwrap_or_else(|| NOT_PROVIDED.to_string()),
        ),
        ("Gender:".to_string(), or(patient.display_gender(), NOT_SPECIFIED)),
        (
            "Date of Examination:".to_string(),
            patient
                .scan_date
                .map(|d| d.format("%B %d, %Y").to_string())
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        ),
        ("Referring Physician:".to_string(), or(patient.display_physician(), NOT_SPECIFIED)),
        ("Clinical Notes:".to_string(), or(patient.display_clinical_notes(), NOT_PROVIDED)),
        ("Examination Type:".to_string(), EXAMINATION_TYPE.to_string()),
    ])
}

fn breakdown_table(result: &ClassificationResult) -> Section {
    let row = |category: &str, percent: f64, note: &str| {
        vec![
            category.to_string(),
            format!("{percent:.2}%"),
            ConfidenceTier::from_percent(percent).label().to_string(),
            note.to_string(),
        ]
    };

    Section::Table {
        header: vec![
            "Classification Category".to_string(),
            "Probability".to_string(),
            "Confidence Level".to_string(),
            "Clinical Interpretation".to_string(),
        ],
        rows: vec![
            row(
                "Benign (Non-cancerous)",
                result.benign_confidence(),
                "Routine monitoring may be sufficient",
            ),
            row(
                "Malignant (Cancerous)",
                result.malignant_confidence(),
                "Further evaluation recommended",
            ),
        ],
        widths: BREAKDOWN_WIDTHS.to_vec(),
    }
}

/// Reject records that could not have come out of `assemble`.
fn check_result(result: &ClassificationResult) -> Result<()> {
    result.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThyraError;
    use chrono::TimeZone;

    fn at() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 14, 15, 9, 26)
            .unwrap()
    }

    #[test]
    fn report_id_uses_unix_seconds() {
        assert_eq!(report_id(&at()), "THY-AI-1741964966");
    }

    #[test]
    fn interpretation_bands() {
        assert!(interpretation(95.0).starts_with("High Confidence"));
        assert!(interpretation(90.0).starts_with("High Confidence"));
        assert!(interpretation(89.99).starts_with("Moderate Confidence"));
        assert!(interpretation(65.0).starts_with("Low Confidence"));
    }

    #[test]
    fn malformed_result_is_rendering_failure() {
        for bogus in [
            ClassificationResult::new(Label::Benign, f64::NAN, 10.0),
            ClassificationResult::new(Label::Benign, 5.0, 95.0),
        ] {
            let err = render_document_at(&PatientInfo::new("Jane"), &bogus, at()).unwrap_err();
            assert!(matches!(err, ThyraError::Rendering(_)));
        }
    }

    #[test]
    fn timestamp_formats() {
        let result = ClassificationResult::new(Label::Benign, 92.0, 8.0);
        let doc = render_document_at(&PatientInfo::new("Jane"), &result, at()).unwrap();
        assert_eq!(
            doc.field("Report Generated:"),
            Some("Friday, March 14, 2025 at 03:09 PM")
        );
        assert_eq!(doc.field("Report Generation:"), Some("2025-03-14 15:09:26"));
    }
}
