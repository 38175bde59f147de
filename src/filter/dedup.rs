use crate::geometry::distance;
use crate::types::{ImageDims, ReflectionAxis};
use log::debug;
use serde::{Deserialize, Serialize};

/// Tolerances of the pairwise axis deduplication.
///
/// With `s = sensitivity`, the slope tolerance is `H / s` and the primary
/// endpoint budget is the mean of `W / s` and `H / s`. The opposite
/// endpoints must lie within `budget * s * secondary_scale`; this secondary
/// budget scales *up* with the sensitivity and is best treated as an
/// empirically tuned knob.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSimilarity {
    pub sensitivity: f32,
    pub secondary_scale: f32,
}

impl Default for AxisSimilarity {
    fn default() -> Self {
        Self {
            sensitivity: 8.0,
            secondary_scale: 0.66,
        }
    }
}

/// Remove near-duplicate axes, keeping the higher-scoring one of each pair.
///
/// Two axes are compared when their slopes differ by less than `H / s`, or
/// when both slopes exceed `H / 3` in magnitude (near-vertical lines, whose
/// raw slopes are not comparable). Both endpoint correspondences are tried,
/// since either axis may store its ends in either order. On a match the
/// lower score is removed (the later axis on ties).
///
/// This is a single pass over all pairs `i < j`. It is not iterated to a
/// fixed point, but every surviving pair has been compared, so running it
/// again on its own output removes nothing.
pub fn deduplicate_axes(
    axes: Vec<ReflectionAxis>,
    dims: ImageDims,
    similarity: AxisSimilarity,
) -> Vec<ReflectionAxis> {
    let s = similarity.sensitivity;
    let max_dist = 0.5 * (dims.width / s + dims.height / s);
    let secondary = max_dist * s * similarity.secondary_scale;
    let max_slope_diff = dims.height / s;
    let vertical_slope = dims.height / 3.0;

    let mut keep = vec![true; axes.len()];
    for i in 0..axes.len() {
        for j in (i + 1)..axes.len() {
            if !keep[i] {
                break;
            }
            if !keep[j] {
                continue;
            }
            let (a, b) = (&axes[i], &axes[j]);
            let comparable = (a.slope - b.slope).abs() < max_slope_diff
                || (a.slope.abs() > vertical_slope && b.slope.abs() > vertical_slope);
            if !comparable {
                continue;
            }
            if endpoints_match(a, b, max_dist, secondary) {
                let weaker = if a.score < b.score { i } else { j };
                keep[weaker] = false;
            }
        }
    }

    let total = axes.len();
    let kept: Vec<ReflectionAxis> = axes
        .into_iter()
        .zip(keep)
        .filter_map(|(axis, keep)| keep.then_some(axis))
        .collect();
    debug!(
        "deduplicate_axes sensitivity={:.2}: kept {}/{}",
        s,
        kept.len(),
        total
    );
    kept
}

/// Checks the four endpoint correspondences in a fixed order: a leading pair
/// within `max_dist` and the complementary pair within `secondary`.
fn endpoints_match(
    a: &ReflectionAxis,
    b: &ReflectionAxis,
    max_dist: f32,
    secondary: f32,
) -> bool {
    let pairings = [
        ((a.p0, b.p0), (a.p1, b.p1)),
        ((a.p0, b.p1), (a.p1, b.p0)),
        ((a.p1, b.p0), (a.p0, b.p1)),
        ((a.p1, b.p1), (a.p0, b.p0)),
    ];
    pairings.iter().any(|&((l0, l1), (r0, r1))| {
        distance(l0, l1) < max_dist && distance(r0, r1) < secondary
    })
}
