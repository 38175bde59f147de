use super::stages::{DecompositionStage, DedupStage, PruneStage, SynthesisStage};
use super::timing::TimingBreakdown;
use crate::types::SymmetryResult;
use serde::Serialize;

/// Result produced by [`SymmetryEngine::process_with_diagnostics`](crate::SymmetryEngine).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymmetryReport {
    pub result: SymmetryResult,
    pub trace: SymmetryTrace,
}

/// Stage-by-stage record of one image run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymmetryTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub decomposition: DecompositionStage,
    pub pre_synthesis_prune: PruneStage,
    pub synthesis: SynthesisStage,
    pub post_synthesis_prune: PruneStage,
    pub dedup: DedupStage,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    /// Size the pipeline ran at; differs from `width`/`height` when the
    /// source was resized.
    pub processed_width: usize,
    pub processed_height: usize,
}
