//! Clinical report generation.
//!
//! [`render_document`] turns a patient record and a classification result
//! into a [`Document`]; a [`DocumentWriter`] turns that into bytes.

mod builder;
mod document;
mod html;
mod narration;
mod pdf;
mod text;
mod writer;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

pub use builder::{
    ANALYSIS_TYPE, EXAMINATION_TYPE, HEADING_DISCLAIMER, HEADING_INTERPRETATION,
    HEADING_PATIENT, HEADING_QUALITY, HEADING_RECOMMENDATIONS, HEADING_REPORT_INFO,
    HEADING_RESULTS, HEADING_TECHNICAL, MODEL_VERSION, REPORT_SUBTITLE, REPORT_TITLE, headline,
    interpretation, label_tone, render_document, render_document_at, report_id,
};
pub use document::{Document, Section, Tone};
pub use html::render_html_summary;
pub use narration::render_narration;
pub use pdf::PdfWriter;
pub use text::{TextWriter, render_text};
pub use writer::{DocumentWriter, ReportFormat};

use crate::error::Result;

/// Rendered report bytes plus what a caller needs to hand them out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedReport {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: &'static str,
    pub report_id: String,
    pub format: ReportFormat,
}

/// Write `document` in `format`.
pub fn write_document(document: &Document, format: ReportFormat) -> Result<Vec<u8>> {
    match format {
        ReportFormat::Pdf => PdfWriter.write(document),
        ReportFormat::Text => TextWriter.write(document),
    }
}

/// Render and write in one step, with a download file name.
pub fn render_report(
    document: &Document,
    patient_name: &str,
    format: ReportFormat,
) -> Result<RenderedReport> {
    let bytes = write_document(document, format)?;
    Ok(RenderedReport {
        bytes,
        file_name: file_name_for(patient_name, &document.generated_at, format),
        mime_type: format.mime_type(),
        report_id: document.report_id.clone(),
        format,
    })
}

/// `Enhanced_Thyroid_Report_<Name>_<YYYYMMDD_HHMM>.<ext>`, spaces in the
/// name replaced by underscores.
pub fn file_name_for(
    patient_name: &str,
    generated_at: &DateTime<FixedOffset>,
    format: ReportFormat,
) -> String {
    let name = patient_name.trim().replace(' ', "_");
    format!(
        "Enhanced_Thyroid_Report_{name}_{}.{}",
        generated_at.format("%Y%m%d_%H%M"),
        format.extension()
    )
}
