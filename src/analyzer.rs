//! End-to-end analysis facade.
//!
//! [`Analyzer`] wires the pipeline together: preprocess, classify, assemble,
//! and on request build and write the clinical report. Every entry point
//! records `metrics` and emits `tracing` events; neither does anything
//! unless the host installs a recorder or subscriber.

use std::time::Instant;

use image::DynamicImage;
use tracing::{info, instrument, warn};

use crate::assemble::assemble;
use crate::chart::ConfidenceChart;
use crate::error::Result;
use crate::model::ClassifierHandle;
use crate::policy::RecommendationSet;
use crate::preprocess::{DecodedImage, decode_image, preprocess};
use crate::report::{
    RenderedReport, ReportFormat, render_document, render_html_summary, render_narration,
    render_report,
};
use crate::telemetry;
use crate::types::{ClassificationResult, PatientInfo};

/// Analysis service bound to one loaded classifier.
#[derive(Debug, Clone)]
pub struct Analyzer {
    handle: ClassifierHandle,
}

impl Analyzer {
    pub fn new(handle: ClassifierHandle) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &ClassifierHandle {
        &self.handle
    }

    /// Classify a decoded image.
    #[instrument(skip_all, fields(classifier = self.handle.classifier_name()))]
    pub fn analyze(&self, image: &DynamicImage) -> Result<ClassificationResult> {
        let tensor = preprocess(image);

        let start = Instant::now();
        let predicted = self.handle.predict(&tensor);
        metrics::histogram!(telemetry::INFERENCE_DURATION_SECONDS)
            .record(start.elapsed().as_secs_f64());

        let probabilities = match predicted {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "inference failed");
                record_analysis("none", false);
                return Err(e);
            }
        };

        let result = assemble(&probabilities, self.handle.labels());
        record_analysis(result.predicted_label().as_str(), true);
        info!(
            label = %result.predicted_label(),
            confidence = result.confidence(),
            benign = result.benign_confidence(),
            malignant = result.malignant_confidence(),
            "analysis complete"
        );
        Ok(result)
    }

    /// Decode upload bytes, then classify.
    ///
    /// Decoder failures are counted as failed analyses.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<(DecodedImage, ClassificationResult)> {
        let decoded = decode_image(bytes).inspect_err(|e| {
            warn!(error = %e, "image decode failed");
            record_analysis("none", false);
        })?;
        let result = self.analyze(&decoded.image)?;
        Ok((decoded, result))
    }

    /// Build and write the clinical report.
    ///
    /// A blank patient name is refused with `InvalidPatientInput` before any
    /// rendering happens.
    #[instrument(skip_all, fields(format = %format))]
    pub fn generate_report(
        &self,
        result: &ClassificationResult,
        patient: &PatientInfo,
        format: ReportFormat,
    ) -> Result<RenderedReport> {
        let outcome = patient
            .require_name()
            .and_then(|name| render_report(&render_document(patient, result)?, name, format));

        let ok = outcome.is_ok();
        metrics::counter!(telemetry::REPORTS_TOTAL,
            "format" => format.as_str(),
            "status" => if ok { "ok" } else { "error" },
        )
        .increment(1);

        match &outcome {
            Ok(report) => info!(
                report_id = %report.report_id,
                bytes = report.bytes.len(),
                "report generated"
            ),
            Err(e) => warn!(error = %e, "report generation failed"),
        }
        outcome
    }

    pub fn narrate(&self, result: &ClassificationResult, patient_name: Option<&str>) -> String {
        render_narration(result, patient_name)
    }

    pub fn summary(&self, result: &ClassificationResult, patient: Option<&PatientInfo>) -> String {
        render_html_summary(result, patient)
    }

    pub fn chart(&self, result: &ClassificationResult) -> ConfidenceChart {
        ConfidenceChart::from_result(result)
    }

    pub fn recommendations(&self, result: &ClassificationResult) -> RecommendationSet {
        RecommendationSet::for_result(result)
    }
}

fn record_analysis(label: &'static str, ok: bool) {
    metrics::counter!(telemetry::ANALYSES_TOTAL,
        "label" => label,
        "status" => if ok { "ok" } else { "error" },
    )
    .increment(1);
}
