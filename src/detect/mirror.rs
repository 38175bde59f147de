use super::SymmetryDetector;
use crate::error::DetectorError;
use crate::image::ImageRgb8;
use crate::types::RawAxis;
use log::debug;
use serde::Deserialize;

/// Options of the baseline mirror-correlation detector.
///
/// Candidates are placed every `step_fraction * dim` pixels inside the
/// central `search_fraction` of the tile, for both vertical and horizontal
/// axes. Each candidate compares the grayscale band on one side with the
/// mirrored band on the other.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MirrorDetectorOptions {
    /// Candidate spacing as a fraction of the tile dimension.
    pub step_fraction: f32,
    /// Central fraction of the tile searched for axes.
    pub search_fraction: f32,
    /// Pixel stride used when sampling the mirrored bands.
    pub sample_step: usize,
    /// Bands whose mean absolute deviation is below this (gray levels) score 0.
    pub min_contrast: f32,
    /// Maximum number of axes reported per tile.
    pub max_axes: usize,
    /// Same-orientation candidates closer than this fraction of the
    /// dimension to a stronger one are suppressed.
    pub suppression_fraction: f32,
}

impl Default for MirrorDetectorOptions {
    fn default() -> Self {
        Self {
            step_fraction: 0.05,
            search_fraction: 0.5,
            sample_step: 2,
            min_contrast: 4.0,
            max_axes: 6,
            suppression_fraction: 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    orientation: Orientation,
    position: usize,
    score: f32,
}

/// Baseline detector restricted to axis-aligned reflection axes.
#[derive(Clone, Debug, Default)]
pub struct MirrorDetector {
    options: MirrorDetectorOptions,
}

impl MirrorDetector {
    pub fn new(options: MirrorDetectorOptions) -> Self {
        Self { options }
    }

    fn candidate_positions(&self, dim: usize) -> Vec<usize> {
        let half_band = (self.options.search_fraction.clamp(0.0, 1.0) * 0.5 * dim as f32) as usize;
        let center = dim / 2;
        let lo = center.saturating_sub(half_band).max(1);
        let hi = (center + half_band).min(dim.saturating_sub(1));
        let step = ((self.options.step_fraction * dim as f32) as usize).max(1);
        (lo..=hi).step_by(step).collect()
    }

    /// Mirror score of the axis between columns (or rows) `pos - 1` and `pos`.
    fn score(&self, tile: &ImageRgb8<'_>, orientation: Orientation, pos: usize) -> f32 {
        let (along, across) = match orientation {
            Orientation::Vertical => (tile.h, tile.w),
            Orientation::Horizontal => (tile.w, tile.h),
        };
        let reach = pos.min(across - pos);
        if reach == 0 {
            return 0.0;
        }
        let step = self.options.sample_step.max(1);
        let sample = |t: usize, k: usize| -> (f32, f32) {
            match orientation {
                Orientation::Vertical => (tile.luma(pos - 1 - k, t), tile.luma(pos + k, t)),
                Orientation::Horizontal => (tile.luma(t, pos - 1 - k), tile.luma(t, pos + k)),
            }
        };

        let mut pairs = Vec::with_capacity((along / step + 1) * (reach / step + 1));
        for t in (0..along).step_by(step) {
            for k in (0..reach).step_by(step) {
                pairs.push(sample(t, k));
            }
        }
        if pairs.is_empty() {
            return 0.0;
        }
        let n = pairs.len() as f32;
        let mean = pairs.iter().map(|(a, b)| a + b).sum::<f32>() / (2.0 * n);
        let spread = pairs
            .iter()
            .map(|(a, b)| (a - mean).abs() + (b - mean).abs())
            .sum::<f32>()
            / (2.0 * n);
        if spread < self.options.min_contrast {
            return 0.0;
        }
        let mismatch = pairs.iter().map(|(a, b)| (a - b).abs()).sum::<f32>() / n;
        let coverage = 2.0 * reach as f32 / across as f32;
        ((1.0 - mismatch / spread) * coverage).clamp(0.0, 1.0)
    }

    fn suppress(&self, mut candidates: Vec<Candidate>, tile: &ImageRgb8<'_>) -> Vec<Candidate> {
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut kept: Vec<Candidate> = Vec::new();
        for cand in candidates {
            if kept.len() >= self.options.max_axes {
                break;
            }
            let dim = match cand.orientation {
                Orientation::Vertical => tile.w,
                Orientation::Horizontal => tile.h,
            };
            let min_sep = self.options.suppression_fraction * dim as f32;
            let clashes = kept.iter().any(|k| {
                k.orientation == cand.orientation
                    && (k.position as f32 - cand.position as f32).abs() < min_sep
            });
            if !clashes {
                kept.push(cand);
            }
        }
        kept
    }
}

impl SymmetryDetector for MirrorDetector {
    fn detect(&self, tile: ImageRgb8<'_>) -> Result<Vec<RawAxis>, DetectorError> {
        if tile.w < 2 || tile.h < 2 {
            return Ok(Vec::new());
        }
        if tile.data.len() < (tile.h - 1) * tile.stride + tile.w * ImageRgb8::CHANNELS {
            return Err(DetectorError::new(format!(
                "tile {}x{} exceeds its buffer ({} bytes)",
                tile.w,
                tile.h,
                tile.data.len()
            )));
        }

        let mut candidates = Vec::new();
        for (orientation, dim) in [
            (Orientation::Vertical, tile.w),
            (Orientation::Horizontal, tile.h),
        ] {
            for position in self.candidate_positions(dim) {
                let score = self.score(&tile, orientation, position);
                if score > 0.0 {
                    candidates.push(Candidate {
                        orientation,
                        position,
                        score,
                    });
                }
            }
        }

        let kept = self.suppress(candidates, &tile);
        let best = kept.first().map(|c| c.score).unwrap_or(0.0);
        debug!(
            "MirrorDetector tile={}x{} axes={} best={:.3}",
            tile.w,
            tile.h,
            kept.len(),
            best
        );
        Ok(kept
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let (p0, p1) = match c.orientation {
                    Orientation::Vertical => {
                        ([c.position as f32, 0.0], [c.position as f32, tile.h as f32])
                    }
                    Orientation::Horizontal => {
                        ([0.0, c.position as f32], [tile.w as f32, c.position as f32])
                    }
                };
                let axis = RawAxis::new(p0, p1, c.score);
                if i == 0 {
                    axis
                } else {
                    axis.with_normalized_score(c.score / best)
                }
            })
            .collect())
    }
}
