mod common;

use common::init_logging;
use common::synthetic_image::{mirrored_rgb, two_tone_rgb};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use symmetry_detector::features::FeatureVector;
use symmetry_detector::image::ImageRgb8;
use symmetry_detector::types::RawAxis;
use symmetry_detector::{
    ClassifierError, DetectorError, EngineParams, MirrorDetector, SymmetryEngine, SymmetryError,
    SynthesisMode,
};

fn params(mode: SynthesisMode) -> EngineParams {
    EngineParams {
        mode,
        ..Default::default()
    }
}

/// A centred cross on the full 100x100 image, nothing on smaller tiles.
fn cross_detector(tile: ImageRgb8<'_>) -> Result<Vec<RawAxis>, DetectorError> {
    if tile.w < 100 || tile.h < 100 {
        return Ok(Vec::new());
    }
    Ok(vec![
        RawAxis::new([50.0, 0.0], [50.0, 100.0], 0.5),
        RawAxis::new([0.0, 50.0], [100.0, 50.0], 0.5).with_normalized_score(0.9),
    ])
}

#[test]
fn rules_mode_turns_a_centred_cross_into_one_rotation() {
    init_logging();
    let data = vec![0u8; 100 * 100 * 3];
    let image = ImageRgb8::packed(100, 100, &data);
    let engine = SymmetryEngine::new(params(SynthesisMode::Rules), cross_detector);

    let report = engine.process_with_diagnostics(image).unwrap();
    let result = &report.result;
    assert!(result.axes.is_empty(), "axes={:?}", result.axes);
    assert_eq!(result.rotations.len(), 1);
    assert_eq!(result.rotations[0].center, [50.0, 50.0]);
    assert_eq!(result.rotations[0].radius, 50.0);

    let trace = &report.trace;
    assert_eq!(trace.decomposition.splits, 2);
    assert_eq!(trace.decomposition.detector_calls, 5);
    assert_eq!(trace.synthesis.pairs_accepted, 1);
    assert_eq!(trace.synthesis.axes_consumed, 2);
    let labels: Vec<&str> = trace.timings.stages.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["decompose", "prune_pre", "synthesis", "prune_post", "dedup"]
    );
}

#[test]
fn learned_mode_consults_the_classifier_per_intersecting_pair() {
    init_logging();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let classifier = move |features: &FeatureVector| -> Result<bool, ClassifierError> {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(features.intersects && features.perpendicular_diff < 1.0)
    };
    let data = vec![0u8; 100 * 100 * 3];
    let image = ImageRgb8::packed(100, 100, &data);
    let engine =
        SymmetryEngine::new(params(SynthesisMode::Learned), cross_detector).with_classifier(classifier);

    let result = engine.process(image).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.rotations.len(), 1);
    assert!(result.axes.is_empty());
}

#[test]
fn learned_mode_without_classifier_fails_before_detection() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let detector = move |tile: ImageRgb8<'_>| -> Result<Vec<RawAxis>, DetectorError> {
        seen.fetch_add(1, Ordering::SeqCst);
        cross_detector(tile)
    };
    let data = vec![0u8; 100 * 100 * 3];
    let engine = SymmetryEngine::new(params(SynthesisMode::Learned), detector);
    let err = engine.process(ImageRgb8::packed(100, 100, &data)).unwrap_err();
    assert_eq!(err, SymmetryError::MissingClassifier);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn weak_primary_drops_its_whole_sibling_group() {
    init_logging();
    let (w, h) = (100, 80);
    let data = two_tone_rgb(w, h);
    let image = ImageRgb8::packed(w, h, &data);
    let detector = |tile: ImageRgb8<'_>| -> Result<Vec<RawAxis>, DetectorError> {
        let hf = tile.h as f32;
        if tile.w == 100 {
            return Ok(vec![RawAxis::new([50.0, 0.0], [50.0, hf], 0.5)]);
        }
        if tile.w != 50 {
            return Ok(Vec::new());
        }
        let dark = tile.get(0, 0)[0] < 100;
        if dark {
            Ok(vec![RawAxis::new([30.0, 0.0], [30.0, hf], 0.6)])
        } else {
            Ok(vec![
                RawAxis::new([10.0, 0.0], [10.0, hf], 0.1),
                RawAxis::new([25.0, 0.0], [25.0, hf], 0.6).with_normalized_score(0.9),
            ])
        }
    };
    let engine = SymmetryEngine::new(params(SynthesisMode::Rules), detector);
    let report = engine.process_with_diagnostics(image).unwrap();

    let xs: Vec<f32> = report.result.axes.iter().map(|a| a.p0[0]).collect();
    assert_eq!(xs, vec![50.0, 30.0]);
    assert!(report.result.rotations.is_empty());
    assert_eq!(report.trace.decomposition.axes, 4);
    assert_eq!(report.trace.pre_synthesis_prune.kept, 2);
}

#[test]
fn detector_errors_fail_the_image() {
    let detector = |_tile: ImageRgb8<'_>| -> Result<Vec<RawAxis>, DetectorError> {
        Err(DetectorError::new("engine offline"))
    };
    let data = vec![0u8; 64 * 64 * 3];
    let engine = SymmetryEngine::new(params(SynthesisMode::Rules), detector);
    let err = engine.process(ImageRgb8::packed(64, 64, &data)).unwrap_err();
    assert!(matches!(err, SymmetryError::Detector(_)));
    assert!(err.to_string().contains("engine offline"));
}

#[test]
fn mirror_detector_recovers_the_central_axis() {
    init_logging();
    let (w, h) = (120, 80);
    let data = mirrored_rgb(w, h);
    let image = ImageRgb8::packed(w, h, &data);
    let engine = SymmetryEngine::new(params(SynthesisMode::Rules), MirrorDetector::default());

    let result = engine.process(image).unwrap();
    let centre = w as f32 / 2.0;
    let on_axis = result
        .axes
        .iter()
        .any(|a| (a.p0[0] - centre).abs() <= 1.0 && (a.p1[0] - centre).abs() <= 1.0);
    let on_rotation = result
        .rotations
        .iter()
        .any(|r| (r.center[0] - centre).abs() <= 1.0);
    assert!(
        on_axis || on_rotation,
        "central axis missing: axes={:?} rotations={:?}",
        result.axes,
        result.rotations
    );
    assert!(result
        .axes
        .iter()
        .all(|a| a.p0[0] <= w as f32 && a.p1[1] <= h as f32));
}
