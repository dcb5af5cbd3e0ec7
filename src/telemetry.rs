//! Telemetry metric name constants.
//!
//! Centralised metric names for thyra operations. Hosts install their own
//! `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `thyra_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `label`: predicted class: "benign" or "malignant" ("none" on failure)
//! - `format`: report output: "pdf" or "text"
//! - `status`: outcome: "ok" or "error"

/// Total image analyses (preprocess + predict + assemble).
///
/// Labels: `label`, `status` ("ok" | "error").
pub const ANALYSES_TOTAL: &str = "thyra_analyses_total";

/// Classifier forward pass duration in seconds.
pub const INFERENCE_DURATION_SECONDS: &str = "thyra_inference_duration_seconds";

/// Total report generation attempts.
///
/// Labels: `format`, `status` ("ok" | "error").
pub const REPORTS_TOTAL: &str = "thyra_reports_total";
