use super::{PairCollector, RotationSynthesizer, Synthesis};
use crate::error::SymmetryError;
use crate::geometry::{endpoint_distances, is_perpendicular, line_intersect};
use crate::types::{ImageDims, ReflectionAxis};
use log::debug;

/// Geometric pairing rules used when no classifier is available.
#[derive(Clone, Copy, Debug)]
pub struct RuleSynthesizer {
    /// Pairs are rejected when `max(score) * circle_sym_threshold` exceeds
    /// `min(score)`.
    pub circle_sym_threshold: f32,
}

impl Default for RuleSynthesizer {
    fn default() -> Self {
        Self {
            circle_sym_threshold: 0.75,
        }
    }
}

impl RuleSynthesizer {
    pub fn new(circle_sym_threshold: f32) -> Self {
        Self {
            circle_sym_threshold,
        }
    }

    /// Intersection of an accepted pair.
    fn accepts(&self, a: &ReflectionAxis, b: &ReflectionAxis, dims: ImageDims) -> Option<[f32; 2]> {
        let (hi, lo) = if a.score >= b.score {
            (a.score, b.score)
        } else {
            (b.score, a.score)
        };
        if hi * self.circle_sym_threshold > lo {
            return None;
        }
        if !is_perpendicular(a.slope, b.slope) {
            return None;
        }
        let center = line_intersect((a.p0, a.p1), (b.p0, b.p1))?;

        let max_difference = dims.height.min(dims.width) / 5.0;
        let d = endpoint_distances(center, (a.p0, a.p1), (b.p0, b.p1));
        for i in 0..d.len() {
            for j in (i + 1)..d.len() {
                if (d[i] - d[j]).abs() > max_difference {
                    return None;
                }
            }
        }
        Some(center)
    }
}

impl RotationSynthesizer for RuleSynthesizer {
    fn synthesize(
        &self,
        axes: Vec<ReflectionAxis>,
        dims: ImageDims,
    ) -> Result<Synthesis, SymmetryError> {
        let mut collector = PairCollector::default();
        for i in 0..axes.len() {
            for j in (i + 1)..axes.len() {
                collector.pairs_evaluated += 1;
                if let Some(center) = self.accepts(&axes[i], &axes[j], dims) {
                    collector.accept(&axes[i], &axes[j], center);
                }
            }
        }
        let out = collector.finish(axes);
        debug!(
            "RuleSynthesizer: pairs={} accepted={} axes_left={}",
            out.pairs_evaluated,
            out.pairs_accepted,
            out.axes.len()
        );
        Ok(out)
    }
}
