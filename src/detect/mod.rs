//! Reflection-symmetry detector interface.
//!
//! A detector receives one RGB tile and reports candidate axes in tile
//! coordinates, ordered by descending score. The first axis is the primary
//! one; it may omit its normalized score, which the decomposer reads as
//! `1.0`. Returning no axes is a valid answer (no symmetry in the tile).
//!
//! Closures of the shape `Fn(ImageRgb8<'_>) -> Result<Vec<RawAxis>, DetectorError>`
//! implement the trait directly, which keeps test doubles small.
//!
//! [`MirrorDetector`] is a baseline that only considers axis-aligned
//! candidates; any stronger detector can be plugged in through the trait.

mod mirror;

pub use mirror::{MirrorDetector, MirrorDetectorOptions};

use crate::error::DetectorError;
use crate::image::ImageRgb8;
use crate::types::RawAxis;

pub trait SymmetryDetector {
    /// Detect reflection axes on `tile`, strongest first.
    fn detect(&self, tile: ImageRgb8<'_>) -> Result<Vec<RawAxis>, DetectorError>;
}

impl<F> SymmetryDetector for F
where
    F: Fn(ImageRgb8<'_>) -> Result<Vec<RawAxis>, DetectorError>,
{
    fn detect(&self, tile: ImageRgb8<'_>) -> Result<Vec<RawAxis>, DetectorError> {
        self(tile)
    }
}
