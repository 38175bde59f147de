use crate::decompose::{Decomposition, MinSize};
use crate::engine::SynthesisMode;
use crate::filter::ScoreThresholds;
use serde::Serialize;

/// Recursive decomposition counters.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecompositionStage {
    pub elapsed_ms: f64,
    pub min_size: MinSize,
    pub max_depth: u32,
    pub split_threshold: f32,
    pub tiles_visited: usize,
    pub detector_calls: usize,
    pub splits: usize,
    pub max_depth_reached: u32,
    pub axes: usize,
}

impl DecompositionStage {
    pub fn from_decomposition(
        out: &Decomposition,
        min_size: MinSize,
        max_depth: u32,
        split_threshold: f32,
        elapsed_ms: f64,
    ) -> Self {
        Self {
            elapsed_ms,
            min_size,
            max_depth,
            split_threshold,
            tiles_visited: out.tiles_visited,
            detector_calls: out.detector_calls,
            splits: out.splits,
            max_depth_reached: out.max_depth_reached,
            axes: out.axes.len(),
        }
    }
}

/// One pruning pass.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PruneStage {
    pub elapsed_ms: f64,
    pub thresholds: ScoreThresholds,
    pub total: usize,
    pub kept: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisStage {
    pub elapsed_ms: f64,
    pub mode: SynthesisMode,
    pub pairs_evaluated: usize,
    pub pairs_accepted: usize,
    pub axes_consumed: usize,
}

/// Final axis and rotation deduplication.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupStage {
    pub elapsed_ms: f64,
    pub axes_total: usize,
    pub axes_kept: usize,
    pub rotations_total: usize,
    pub rotations_kept: usize,
}
