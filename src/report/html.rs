//! Inline HTML preview of a result.

use std::fmt::Write;

use crate::report::builder::headline;
use crate::types::{ClassificationResult, ConfidenceTier, Label, PatientInfo};

/// Short HTML fragment with the headline facts of the report.
///
/// Patient text is escaped; everything else is fixed wording.
pub fn render_html_summary(result: &ClassificationResult, patient: Option<&PatientInfo>) -> String {
    let label = result.predicted_label();
    let css_class = match label {
        Label::Benign => "thyra-benign",
        Label::Malignant => "thyra-malignant",
    };
    let tier = ConfidenceTier::from_percent(result.confidence());

    let mut html = String::with_capacity(512);
    // Writing to a String cannot fail.
    let _ = writeln!(html, r#"<div class="thyra-summary {css_class}">"#);
    let _ = writeln!(html, "  <h3>Classification Results</h3>");
    if let Some(name) = patient.and_then(PatientInfo::display_name) {
        let name = html_escape::encode_safe(name);
        let _ = writeln!(html, r#"  <p class="patient">Patient: {name}</p>"#);
    }
    let _ = writeln!(
        html,
        r#"  <p class="prediction"><strong>Prediction: {}</strong> ({:.1}% confidence)</p>"#,
        headline(label),
        result.confidence()
    );
    let _ = writeln!(html, r#"  <p class="tier">Confidence Level: {tier}</p>"#);
    let _ = writeln!(html, "  <ul>");
    let _ = writeln!(
        html,
        "    <li>Benign probability: {:.2}%</li>",
        result.benign_confidence()
    );
    let _ = writeln!(
        html,
        "    <li>Malignant probability: {:.2}%</li>",
        result.malignant_confidence()
    );
    let _ = writeln!(html, "  </ul>");
    let _ = writeln!(
        html,
        r#"  <p class="notice">For research use only. Always consult healthcare professionals for medical decisions.</p>"#
    );
    html.push_str("</div>");
    html
}
