//! Live tests against real model artifacts.
//!
//! Run with: `THYRA_MODEL_DIR=/path/to/artifacts cargo test --test onnx_live_test -- --ignored`

#![cfg(feature = "onnx")]

use image::{DynamicImage, Rgb, RgbImage};

use thyra::{Analyzer, ClassifierHandle, ModelConfig, PatientInfo, ReportFormat};

fn analyzer() -> Analyzer {
    let handle = ClassifierHandle::load(&ModelConfig::default())
        .expect("THYRA_MODEL_DIR must contain the model and label mapping");
    Analyzer::new(handle)
}

#[test]
#[ignore]
fn live_classification_is_well_formed() {
    let analyzer = analyzer();
    let image = DynamicImage::ImageRgb8(RgbImage::from_fn(256, 256, |x, y| {
        let v = ((x ^ y) & 0xff) as u8;
        Rgb([v, v, v])
    }));

    let result = analyzer.analyze(&image).unwrap();
    let total = result.benign_confidence() + result.malignant_confidence();
    assert!((total - 100.0).abs() < 0.5, "probabilities sum to {total}");
    assert_eq!(
        result.confidence(),
        result.benign_confidence().max(result.malignant_confidence())
    );
}

#[test]
#[ignore]
fn live_inference_is_deterministic() {
    let analyzer = analyzer();
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(128, 128, Rgb([120, 120, 120])));

    let first = analyzer.analyze(&image).unwrap();
    let second = analyzer.analyze(&image).unwrap();
    assert_eq!(first, second);
}

#[test]
#[ignore]
fn live_report_round_trip() {
    let analyzer = analyzer();
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 200, Rgb([60, 60, 60])));
    let result = analyzer.analyze(&image).unwrap();

    let report = analyzer
        .generate_report(&result, &PatientInfo::new("Live Test"), ReportFormat::Pdf)
        .unwrap();
    let parsed = lopdf::Document::load_mem(&report.bytes).unwrap();
    assert!(parsed.get_pages().len() >= 2);
}
