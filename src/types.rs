//! Core records flowing through the aggregation pipeline.
//!
//! - [`RawAxis`]: what a detector reports for one tile, in tile coordinates.
//! - [`ReflectionAxis`]: a detector axis translated into global image
//!   coordinates and tagged with the recursion depth it was found at.
//! - [`RotationalSymmetry`]: a point symmetry synthesized from two axes.
//!
//! Axes and rotations carry stable integer identifiers assigned at creation.
//! Every removal in the pipeline is keyed on these identifiers, so two
//! numerically identical detector outputs remain distinct records.
use serde::{Deserialize, Serialize};

/// Identifier of a reflection axis, unique within one image run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisId(pub u32);

/// Identifier of a rotational symmetry, unique within one image run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RotationId(pub u32);

/// Width/height pair of the image under analysis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageDims {
    pub width: f32,
    pub height: f32,
}

impl ImageDims {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Axis as returned by a symmetry detector for a single tile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawAxis {
    pub p0: [f32; 2],
    pub p1: [f32; 2],
    pub score: f32,
    /// Score relative to the strongest axis of the tile. `None` marks the
    /// primary axis and is read as `1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_score: Option<f32>,
}

impl RawAxis {
    pub fn new(p0: [f32; 2], p1: [f32; 2], score: f32) -> Self {
        Self {
            p0,
            p1,
            score,
            normalized_score: None,
        }
    }

    pub fn with_normalized_score(mut self, normalized: f32) -> Self {
        self.normalized_score = Some(normalized);
        self
    }
}

/// Reflection axis in global image coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionAxis {
    pub id: AxisId,
    pub p0: [f32; 2],
    pub p1: [f32; 2],
    /// `dy/dx`, with vertical axes mapped to the image height.
    pub slope: f32,
    pub score: f32,
    pub normalized_score: f32,
    /// Recursion level the axis was found at; 0 is the whole image.
    pub depth: u32,
}

impl ReflectionAxis {
    /// Primary axis of its sibling group (the detector supplied no
    /// normalized score for it).
    pub fn is_primary(&self) -> bool {
        self.normalized_score == 1.0
    }

    pub fn length(&self) -> f32 {
        crate::geometry::segment_length(self.p0, self.p1)
    }
}

/// Point symmetry inferred from two compatible reflection axes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationalSymmetry {
    pub id: RotationId,
    pub center: [f32; 2],
    pub radius: f32,
    /// Mean depth of the two contributing axes (dedup tie-breaker).
    pub mean_depth: f32,
    pub axes: [AxisId; 2],
}

/// Final per-image output: surviving reflection axes and rotations.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymmetryResult {
    pub axes: Vec<ReflectionAxis>,
    pub rotations: Vec<RotationalSymmetry>,
    pub latency_ms: f64,
}

impl SymmetryResult {
    /// Map results computed on a resized image back to source pixels.
    ///
    /// `sx`/`sy` are source-over-processed scale factors. Slopes are
    /// recomputed against `source_height` so the vertical sentinel stays
    /// consistent with the new frame.
    pub fn to_source_space(&self, sx: f32, sy: f32, source_height: f32) -> SymmetryResult {
        let scale = |p: [f32; 2]| [p[0] * sx, p[1] * sy];
        let axes = self
            .axes
            .iter()
            .map(|axis| {
                let p0 = scale(axis.p0);
                let p1 = scale(axis.p1);
                ReflectionAxis {
                    p0,
                    p1,
                    slope: crate::geometry::slope(p0, p1, source_height),
                    ..axis.clone()
                }
            })
            .collect();
        let rotations = self
            .rotations
            .iter()
            .map(|rot| RotationalSymmetry {
                center: scale(rot.center),
                radius: rot.radius * 0.5 * (sx + sy),
                ..rot.clone()
            })
            .collect();
        SymmetryResult {
            axes,
            rotations,
            latency_ms: self.latency_ms,
        }
    }
}
