//! Pairwise feature vector consumed by the rotational classifier.
//!
//! Only relative quantities survive: score/slope/length differences, the
//! perpendicular-slope relation and normalized endpoint-to-intersection
//! terms. Raw coordinates and absolute scores are dropped, so a model never
//! sees where in the image a pair sits.
//!
//! The distance terms mirror the pre-processing the bundled forest models
//! were trained with: `|len_a - 2 d_k| / area`, where `d_k` is the distance
//! from endpoint `k` (a.p0, a.p1, b.p0, b.p1) to the intersection and
//! `len_a` is the length of the first axis. Pairs without intersection use
//! `-1` for every distance term.
use crate::geometry::{endpoint_distances, line_intersect, slope};
use crate::types::{ImageDims, ReflectionAxis};
use serde::Serialize;

/// Number of values in [`FeatureVector::values`].
pub const FEATURE_COUNT: usize = 16;

/// Column names in the order of [`FeatureVector::values`].
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "score_diff",
    "slope_a",
    "slope_b",
    "slope_diff",
    "perpendicular_slope",
    "perpendicular_diff",
    "length_diff",
    "intersects",
    "dist_to_intersect_1",
    "dist_to_intersect_2",
    "dist_to_intersect_3",
    "dist_to_intersect_4",
    "dist_deviation_1",
    "dist_deviation_2",
    "dist_deviation_3",
    "dist_deviation_4",
];

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    pub score_diff: f32,
    pub slope_a: f32,
    pub slope_b: f32,
    pub slope_diff: f32,
    pub perpendicular_slope: f32,
    pub perpendicular_diff: f32,
    pub length_diff: f32,
    pub intersects: bool,
    pub dist_to_intersect: [f32; 4],
    pub dist_deviation: [f32; 4],
}

impl FeatureVector {
    /// Build the features of the pair `(a, b)` for an image of `dims`.
    pub fn from_pair(a: &ReflectionAxis, b: &ReflectionAxis, dims: ImageDims) -> Self {
        let slope_a = slope(a.p0, a.p1, dims.height);
        let slope_b = slope(b.p0, b.p1, dims.height);
        let (perpendicular_slope, perpendicular_diff) = if slope_a != 0.0 {
            let perp = -1.0 / slope_a;
            (perp, (perp - slope_b).abs())
        } else if slope_b != 0.0 {
            let perp = -1.0 / slope_b;
            (perp, (perp - slope_a).abs())
        } else {
            (-1.0, -1.0)
        };

        let len_a = a.length();
        let len_b = b.length();
        let intersection = line_intersect((a.p0, a.p1), (b.p0, b.p1));
        let dist_to_intersect = match intersection {
            Some(point) => {
                let area = dims.area().max(f32::EPSILON);
                endpoint_distances(point, (a.p0, a.p1), (b.p0, b.p1))
                    .map(|d| (len_a - 2.0 * d).abs() / area)
            }
            None => [-1.0; 4],
        };
        let mean = dist_to_intersect.iter().sum::<f32>() / 4.0;
        let dist_deviation = dist_to_intersect.map(|d| (d - mean).abs());

        Self {
            score_diff: (a.score - b.score).abs(),
            slope_a,
            slope_b,
            slope_diff: (slope_a - slope_b).abs(),
            perpendicular_slope,
            perpendicular_diff,
            length_diff: (len_a - len_b).abs(),
            intersects: intersection.is_some(),
            dist_to_intersect,
            dist_deviation,
        }
    }

    /// Flatten into the fixed column order of [`FEATURE_NAMES`].
    pub fn values(&self) -> [f32; FEATURE_COUNT] {
        let d = &self.dist_to_intersect;
        let m = &self.dist_deviation;
        [
            self.score_diff,
            self.slope_a,
            self.slope_b,
            self.slope_diff,
            self.perpendicular_slope,
            self.perpendicular_diff,
            self.length_diff,
            if self.intersects { 1.0 } else { 0.0 },
            d[0],
            d[1],
            d[2],
            d[3],
            m[0],
            m[1],
            m[2],
            m[3],
        ]
    }
}
