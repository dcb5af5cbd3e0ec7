//! Thyra - thyroid ultrasound nodule classification
//!
//! This crate turns an ultrasound image into a benign/malignant
//! classification with per-class confidences, then into a printable
//! clinical report, a spoken-style narration, and an HTML summary.
//!
//! The classifier is loaded once into a [`ClassifierHandle`] and passed
//! explicitly to every analysis. All outputs are for research and
//! educational use only.
//!
//! # Example
//!
//! ```rust,no_run
//! use thyra::{Analyzer, ClassifierHandle, ModelConfig, PatientInfo, ReportFormat};
//!
//! fn main() -> thyra::Result<()> {
//!     let handle = ClassifierHandle::load(&ModelConfig::default())?;
//!     let analyzer = Analyzer::new(handle);
//!
//!     let image = image::open("nodule.png").map_err(thyra::ThyraError::from)?;
//!     let result = analyzer.analyze(&image)?;
//!     println!("{} ({:.1}%)", result.predicted_label(), result.confidence());
//!
//!     let patient = PatientInfo::new("Jane Doe").physician("Dr. Smith");
//!     let report = analyzer.generate_report(&result, &patient, ReportFormat::Pdf)?;
//!     std::fs::write(&report.file_name, &report.bytes)
//!         .map_err(|e| thyra::ThyraError::Rendering(e.to_string()))?;
//!     Ok(())
//! }
//! ```
//!
//! # Without a model
//!
//! Every stage after inference is pure and works on values:
//!
//! ```rust
//! use thyra::{LabelMapping, PatientInfo, ProbabilityVector, assemble, render_document};
//!
//! let labels = LabelMapping::from_classes(&["benign", "malignant"]).unwrap();
//! let result = assemble(&ProbabilityVector::new(0.92, 0.08), &labels);
//! assert!((result.confidence() - 92.0).abs() < 1e-9);
//!
//! let document = render_document(&PatientInfo::new("Jane Doe"), &result).unwrap();
//! assert!(document.headings().contains(&"CLINICAL RECOMMENDATIONS"));
//! ```

pub mod analyzer;
pub mod assemble;
pub mod chart;
#[cfg(feature = "cli")]
pub mod config;
pub mod error;
pub mod model;
pub mod policy;
pub mod preprocess;
pub mod report;
pub mod telemetry;
pub mod types;
pub mod version;

// Re-export main types at crate root
pub use analyzer::Analyzer;
pub use assemble::assemble;
pub use chart::ConfidenceChart;
pub use error::{Result, ThyraError};
pub use policy::RecommendationSet;
pub use preprocess::{DecodedImage, ImageDetails, ImageTensor, decode_image, preprocess};
pub use version::{PKG_VERSION, version_string};

// Re-export model types
#[cfg(feature = "onnx")]
pub use model::OnnxClassifier;
pub use model::{
    ClassifierHandle, Device, ImageClassifier, LabelMapping, ModelConfig, OutputActivation,
};

// Re-export report entry points
pub use report::{
    Document, DocumentWriter, PdfWriter, RenderedReport, ReportFormat, Section, TextWriter, Tone,
    render_document, render_html_summary, render_narration,
};

// Re-export all types
pub use types::{
    ClassificationResult, ConfidenceTier, InterpretationBand, Label, PatientInfo,
    ProbabilityVector,
};
