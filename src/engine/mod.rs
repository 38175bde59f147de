//! Symmetry engine running one image through the aggregation pipeline.
//!
//! Stages, in order:
//! - recursive decomposition driving the detector (`decompose`);
//! - pre-synthesis pruning (learned mode: the permissive thresholds that only
//!   gate what the classifier sees; rules mode: the final thresholds);
//! - rotational synthesis with the classifier or the geometric rules;
//! - post-synthesis pruning with the final thresholds;
//! - axis deduplication, then rotation deduplication.
//!
//! Typical usage:
//! ```no_run
//! use symmetry_detector::{EngineParams, MirrorDetector, SymmetryEngine, SynthesisMode};
//! use symmetry_detector::image::io::load_rgb_image;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let params = EngineParams {
//!     mode: SynthesisMode::Rules,
//!     ..Default::default()
//! };
//! let engine = SymmetryEngine::new(params, MirrorDetector::default());
//! let image = load_rgb_image(Path::new("input/butterfly.jpg"))?;
//! let report = engine.process_source(&image)?;
//! println!("axes={} rotations={}", report.result.axes.len(), report.result.rotations.len());
//! # Ok(())
//! # }
//! ```

pub mod params;

pub use params::{EngineParams, SynthesisMode};

use crate::classify::RotationClassifier;
use crate::decompose::{decompose, DecomposeParams};
use crate::detect::SymmetryDetector;
use crate::diagnostics::{
    DecompositionStage, DedupStage, InputDescriptor, PruneStage, SymmetryReport, SymmetryTrace,
    SynthesisStage, TimingBreakdown,
};
use crate::error::SymmetryError;
use crate::filter::{deduplicate_axes, prune_by_threshold};
use crate::image::io::resize_by_fraction;
use crate::image::{ImageRgb8, RgbImageU8};
use crate::rotation::{
    deduplicate_rotations, ClassifierSynthesizer, RotationSynthesizer, RuleSynthesizer,
};
use crate::types::{ImageDims, SymmetryResult};
use log::debug;
use std::time::Instant;

type BoxedDetector = Box<dyn SymmetryDetector + Send + Sync>;
type BoxedClassifier = Box<dyn RotationClassifier + Send + Sync>;

/// Aggregation engine owning its detector and, for learned mode, a
/// classifier. Stateless across images, so one engine may serve a parallel
/// batch.
pub struct SymmetryEngine {
    params: EngineParams,
    detector: BoxedDetector,
    classifier: Option<BoxedClassifier>,
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

impl SymmetryEngine {
    pub fn new<D>(params: EngineParams, detector: D) -> Self
    where
        D: SymmetryDetector + Send + Sync + 'static,
    {
        Self {
            params,
            detector: Box::new(detector),
            classifier: None,
        }
    }

    /// Attach the classifier used in [`SynthesisMode::Learned`].
    pub fn with_classifier<C>(mut self, classifier: C) -> Self
    where
        C: RotationClassifier + Send + Sync + 'static,
    {
        self.classifier = Some(Box::new(classifier));
        self
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    /// Run the pipeline on `image` as given, returning the compact result.
    pub fn process(&self, image: ImageRgb8<'_>) -> Result<SymmetryResult, SymmetryError> {
        self.process_with_diagnostics(image).map(|report| report.result)
    }

    /// Shrink `source` by `params.resize`, run the pipeline, and map the
    /// result back to source pixels.
    pub fn process_source(&self, source: &RgbImageU8) -> Result<SymmetryReport, SymmetryError> {
        if source.width() == 0 || source.height() == 0 {
            return Err(SymmetryError::Image("image has zero size".to_string()));
        }
        let processed =
            resize_by_fraction(source, self.params.resize).map_err(SymmetryError::Image)?;
        let mut report = self.process_with_diagnostics(processed.as_view())?;
        let sx = source.width() as f32 / processed.width() as f32;
        let sy = source.height() as f32 / processed.height() as f32;
        report.result = report
            .result
            .to_source_space(sx, sy, source.height() as f32);
        report.trace.input.width = source.width();
        report.trace.input.height = source.height();
        Ok(report)
    }

    /// Run the pipeline on `image` and return the result with a stage trace.
    pub fn process_with_diagnostics(
        &self,
        image: ImageRgb8<'_>,
    ) -> Result<SymmetryReport, SymmetryError> {
        let params = &self.params;
        debug!(
            "SymmetryEngine::process start w={} h={} mode={}",
            image.w, image.h, params.mode
        );
        let total_start = Instant::now();
        let dims = ImageDims::new(image.w, image.h);

        let synthesizer: Box<dyn RotationSynthesizer + '_> = match params.mode {
            SynthesisMode::Learned => {
                let classifier = self
                    .classifier
                    .as_deref()
                    .ok_or(SymmetryError::MissingClassifier)?;
                Box::new(ClassifierSynthesizer::new(classifier))
            }
            SynthesisMode::Rules => Box::new(RuleSynthesizer::new(params.circle_sym_threshold)),
        };
        let mut timings = TimingBreakdown::default();

        let stage_start = Instant::now();
        let decompose_params = DecomposeParams::for_image(
            dims,
            params.min_size_fraction,
            params.max_axes_per_step,
            params.split_threshold(),
            params.max_depth,
        );
        let decomposition = decompose(image, &*self.detector, &decompose_params)?;
        let ms = elapsed_ms(stage_start);
        timings.push("decompose", ms);
        let decomposition_stage = DecompositionStage::from_decomposition(
            &decomposition,
            decompose_params.min_size,
            decompose_params.max_depth,
            decompose_params.split_threshold,
            ms,
        );

        let stage_start = Instant::now();
        let thresholds = params.pre_synthesis_thresholds();
        let total = decomposition.axes.len();
        let axes = prune_by_threshold(decomposition.axes, thresholds);
        let ms = elapsed_ms(stage_start);
        timings.push("prune_pre", ms);
        let pre_synthesis_prune = PruneStage {
            elapsed_ms: ms,
            thresholds,
            total,
            kept: axes.len(),
        };

        let stage_start = Instant::now();
        let offered = axes.len();
        let synthesis = synthesizer.synthesize(axes, dims)?;
        let ms = elapsed_ms(stage_start);
        timings.push("synthesis", ms);
        let synthesis_stage = SynthesisStage {
            elapsed_ms: ms,
            mode: params.mode,
            pairs_evaluated: synthesis.pairs_evaluated,
            pairs_accepted: synthesis.pairs_accepted,
            axes_consumed: offered - synthesis.axes.len(),
        };

        let stage_start = Instant::now();
        let thresholds = params.post_synthesis_thresholds();
        let total = synthesis.axes.len();
        let axes = prune_by_threshold(synthesis.axes, thresholds);
        let ms = elapsed_ms(stage_start);
        timings.push("prune_post", ms);
        let post_synthesis_prune = PruneStage {
            elapsed_ms: ms,
            thresholds,
            total,
            kept: axes.len(),
        };

        let stage_start = Instant::now();
        let axes_total = axes.len();
        let rotations_total = synthesis.rotations.len();
        let axes = deduplicate_axes(axes, dims, params.axis_similarity);
        let rotations =
            deduplicate_rotations(synthesis.rotations, dims, params.rotation_similarity);
        let ms = elapsed_ms(stage_start);
        timings.push("dedup", ms);
        let dedup = DedupStage {
            elapsed_ms: ms,
            axes_total,
            axes_kept: axes.len(),
            rotations_total,
            rotations_kept: rotations.len(),
        };

        let latency_ms = elapsed_ms(total_start);
        timings.total_ms = latency_ms;
        debug!(
            "SymmetryEngine::process done axes={} rotations={} latency_ms={:.3}",
            axes.len(),
            rotations.len(),
            latency_ms
        );

        Ok(SymmetryReport {
            result: SymmetryResult {
                axes,
                rotations,
                latency_ms,
            },
            trace: SymmetryTrace {
                input: InputDescriptor {
                    width: image.w,
                    height: image.h,
                    processed_width: image.w,
                    processed_height: image.h,
                },
                timings,
                decomposition: decomposition_stage,
                pre_synthesis_prune,
                synthesis: synthesis_stage,
                post_synthesis_prune,
                dedup,
            },
        })
    }
}
