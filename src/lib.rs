#![doc = include_str!("../README.md")]

// Core pipeline
pub mod decompose;
pub mod engine;
pub mod features;
pub mod filter;
pub mod geometry;
pub mod rotation;
pub mod types;

// Collaborator interfaces and bundled implementations
pub mod classify;
pub mod detect;

// Supporting surface
pub mod batch;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;

// --- High-level re-exports -------------------------------------------------

pub use crate::classify::{ForestClassifier, RotationClassifier};
pub use crate::detect::{MirrorDetector, SymmetryDetector};
pub use crate::engine::{EngineParams, SymmetryEngine, SynthesisMode};
pub use crate::error::{ClassifierError, DetectorError, SymmetryError};
pub use crate::types::{ReflectionAxis, RotationalSymmetry, SymmetryResult};

pub use crate::diagnostics::{SymmetryReport, SymmetryTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use symmetry_detector::prelude::*;
///
/// # fn main() -> Result<(), SymmetryError> {
/// let (w, h) = (320usize, 240usize);
/// let rgb = vec![0u8; w * h * 3];
/// let img = ImageRgb8::packed(w, h, &rgb);
///
/// let engine = SymmetryEngine::new(
///     EngineParams {
///         mode: SynthesisMode::Rules,
///         ..Default::default()
///     },
///     MirrorDetector::default(),
/// );
/// let result = engine.process(img)?;
/// println!("axes={} latency_ms={:.3}", result.axes.len(), result.latency_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageRgb8;
    pub use crate::{
        EngineParams, MirrorDetector, SymmetryEngine, SymmetryError, SymmetryResult,
        SynthesisMode,
    };
}
