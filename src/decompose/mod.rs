//! Recursive spatial decomposition driving the symmetry detector.
//!
//! Overview
//! - The detector runs on the whole image (depth 0). Its axes are clamped to
//!   the tile, translated into global coordinates and tagged with the depth
//!   of the call; together they form one *sibling group*.
//! - Up to `max_axes_per_step` of the strongest axes whose score exceeds
//!   `split_threshold` become *main axes*. A near-vertical main axis splits
//!   the tile into a left and right half, a near-horizontal one into a top
//!   and bottom half; diagonal axes do not split. Each half spans the main
//!   axis' extent along the other dimension.
//! - Every half is decomposed recursively with its top-left corner added to
//!   the global offset.
//!
//! Emission order is depth-first: a tile's own group, then the first half's
//! subtree, then the second half's subtree, for each main axis in turn. The
//! filtering pipeline relies on this to find sibling groups as contiguous
//! runs of equal depth.
//!
//! Termination
//! - Tiles smaller than `min_size` (fixed from the top-level image) are not
//!   processed.
//! - Tiles deeper than `max_depth` are not processed; the default cap is
//!   `floor(log2(max(H, W) / min(min_h, min_w)))`, the number of halvings
//!   that take the longest side down to the smallest minimum dimension.
//! - A half that is not strictly smaller than its parent along the split
//!   dimension is skipped.

use crate::detect::SymmetryDetector;
use crate::error::DetectorError;
use crate::geometry::slope;
use crate::image::ImageRgb8;
use crate::types::{AxisId, ImageDims, RawAxis, ReflectionAxis};
use log::debug;
use serde::Serialize;

/// Minimum tile size below which decomposition stops.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MinSize {
    pub height: f32,
    pub width: f32,
}

/// Explicit parameters of one decomposition run.
#[derive(Clone, Debug)]
pub struct DecomposeParams {
    pub min_size: MinSize,
    /// Number of strongest axes considered for splitting (clamped to the
    /// number of detected axes).
    pub max_axes_per_step: usize,
    /// Main axes need a raw score strictly above this value.
    pub split_threshold: f32,
    /// Deepest recursion level that is still processed.
    pub max_depth: u32,
}

impl DecomposeParams {
    /// Parameters for an image of `dims`, with `min_size` taken as
    /// `fraction` of each dimension.
    pub fn for_image(
        dims: ImageDims,
        min_size_fraction: f32,
        max_axes_per_step: usize,
        split_threshold: f32,
        max_depth: Option<u32>,
    ) -> Self {
        let min_size = MinSize {
            height: dims.height * min_size_fraction,
            width: dims.width * min_size_fraction,
        };
        Self {
            min_size,
            max_axes_per_step,
            split_threshold,
            max_depth: max_depth.unwrap_or_else(|| default_max_depth(dims, min_size)),
        }
    }
}

/// `floor(log2(max(H, W) / min(min_h, min_w)))`, or 0 for degenerate sizes.
pub fn default_max_depth(dims: ImageDims, min_size: MinSize) -> u32 {
    let ratio = dims.height.max(dims.width) / min_size.height.min(min_size.width);
    if !ratio.is_finite() || ratio <= 1.0 {
        return 0;
    }
    ratio.log2().floor() as u32
}

/// Flat, depth-tagged output of [`decompose`] plus bookkeeping counters.
#[derive(Clone, Debug, Default)]
pub struct Decomposition {
    pub axes: Vec<ReflectionAxis>,
    pub tiles_visited: usize,
    pub detector_calls: usize,
    pub splits: usize,
    pub max_depth_reached: u32,
}

/// Decompose `image`, querying `detector` on every tile large enough.
///
/// A detector error aborts the run; an empty detector answer only ends the
/// current branch.
pub fn decompose<D>(
    image: ImageRgb8<'_>,
    detector: &D,
    params: &DecomposeParams,
) -> Result<Decomposition, DetectorError>
where
    D: SymmetryDetector + ?Sized,
{
    let mut run = Decomposer {
        detector,
        params,
        image_height: image.h as f32,
        out: Decomposition::default(),
    };
    run.visit(image, 0, [0, 0])?;
    debug!(
        "decompose: axes={} tiles={} detector_calls={} splits={} max_depth={}",
        run.out.axes.len(),
        run.out.tiles_visited,
        run.out.detector_calls,
        run.out.splits,
        run.out.max_depth_reached
    );
    Ok(run.out)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Split {
    LeftRight,
    TopBottom,
}

struct Decomposer<'a, D: ?Sized> {
    detector: &'a D,
    params: &'a DecomposeParams,
    image_height: f32,
    out: Decomposition,
}

impl<D: SymmetryDetector + ?Sized> Decomposer<'_, D> {
    fn visit(
        &mut self,
        tile: ImageRgb8<'_>,
        depth: u32,
        offset: [usize; 2],
    ) -> Result<(), DetectorError> {
        self.out.tiles_visited += 1;
        let min = self.params.min_size;
        if tile.w == 0 || tile.h == 0 || (tile.h as f32) < min.height || (tile.w as f32) < min.width
        {
            return Ok(());
        }
        if depth > self.params.max_depth {
            return Ok(());
        }

        self.out.detector_calls += 1;
        let raw = self.detector.detect(tile)?;
        if raw.is_empty() {
            return Ok(());
        }

        let local: Vec<([f32; 2], [f32; 2])> =
            raw.iter().map(|axis| clamp_to_tile(axis, &tile)).collect();

        let considered = self.params.max_axes_per_step.min(raw.len());
        let main_axes: Vec<([f32; 2], [f32; 2])> = raw[..considered]
            .iter()
            .zip(&local)
            .filter(|(axis, _)| axis.score > self.params.split_threshold)
            .map(|(_, ends)| *ends)
            .collect();

        for (axis, &(p0, p1)) in raw.iter().zip(&local) {
            self.push_axis(axis, p0, p1, depth, offset);
        }
        self.out.max_depth_reached = self.out.max_depth_reached.max(depth);

        for (p0, p1) in main_axes {
            self.split(tile, depth, offset, p0, p1)?;
        }
        Ok(())
    }

    fn push_axis(
        &mut self,
        raw: &RawAxis,
        p0: [f32; 2],
        p1: [f32; 2],
        depth: u32,
        offset: [usize; 2],
    ) {
        let dx = offset[0] as f32;
        let dy = offset[1] as f32;
        let p0 = [p0[0] + dx, p0[1] + dy];
        let p1 = [p1[0] + dx, p1[1] + dy];
        let id = AxisId(self.out.axes.len() as u32);
        self.out.axes.push(ReflectionAxis {
            id,
            p0,
            p1,
            slope: slope(p0, p1, self.image_height),
            score: raw.score,
            normalized_score: raw.normalized_score.unwrap_or(1.0),
            depth,
        });
    }

    fn split(
        &mut self,
        tile: ImageRgb8<'_>,
        depth: u32,
        offset: [usize; 2],
        p0: [f32; 2],
        p1: [f32; 2],
    ) -> Result<(), DetectorError> {
        let (w, h) = (tile.w as f32, tile.h as f32);
        let (kind, halves) = if (p0[0] - p1[0]).abs() < h / 10.0 {
            let y0 = p0[1].min(p1[1]) as usize;
            let y1 = p0[1].max(p1[1]) as usize;
            let xs = p0[0] as usize;
            (
                Split::LeftRight,
                [
                    (tile.crop(0, y0, xs, y1), [offset[0], offset[1] + y0]),
                    (tile.crop(xs, y0, tile.w, y1), [offset[0] + xs, offset[1] + y0]),
                ],
            )
        } else if (p0[1] - p1[1]).abs() < w / 10.0 {
            let x0 = p0[0].min(p1[0]) as usize;
            let x1 = p0[0].max(p1[0]) as usize;
            let ys = p0[1] as usize;
            (
                Split::TopBottom,
                [
                    (tile.crop(x0, 0, x1, ys), [offset[0] + x0, offset[1]]),
                    (tile.crop(x0, ys, x1, tile.h), [offset[0] + x0, offset[1] + ys]),
                ],
            )
        } else {
            return Ok(());
        };

        self.out.splits += 1;
        for (half, half_offset) in halves {
            let shrinks = match kind {
                Split::LeftRight => half.w < tile.w,
                Split::TopBottom => half.h < tile.h,
            };
            if shrinks {
                self.visit(half, depth + 1, half_offset)?;
            }
        }
        Ok(())
    }
}

fn clamp_to_tile(axis: &RawAxis, tile: &ImageRgb8<'_>) -> ([f32; 2], [f32; 2]) {
    let (w, h) = (tile.w as f32, tile.h as f32);
    let clamp = |p: [f32; 2]| [p[0].clamp(0.0, w), p[1].clamp(0.0, h)];
    (clamp(axis.p0), clamp(axis.p1))
}

#[cfg(test)]
mod tests;
