//! Diagnostics data model returned alongside engine results.
//!
//! `SymmetryReport` bundles the final `SymmetryResult` with a
//! `SymmetryTrace` recording counts and timings of every stage the engine
//! executed on one image.

pub mod pipeline;
pub mod stages;
pub mod timing;

pub use pipeline::{InputDescriptor, SymmetryReport, SymmetryTrace};
pub use stages::{DecompositionStage, DedupStage, PruneStage, SynthesisStage};
pub use timing::{StageTiming, TimingBreakdown};
