//! Parameter types configuring one engine run.
//!
//! Defaults reproduce the tuned values of the reference tool, which assumes
//! images are first shrunk by `resize`. Running on full-resolution input will
//! likely need different thresholds.

use crate::filter::{AxisSimilarity, ScoreThresholds};
use serde::{Deserialize, Serialize};

/// How rotational symmetries are synthesized from axis pairs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisMode {
    /// Pairwise features judged by a trained classifier.
    #[default]
    Learned,
    /// Fixed geometric rules; needs no model.
    Rules,
}

impl std::fmt::Display for SynthesisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SynthesisMode::Learned => f.write_str("learned"),
            SynthesisMode::Rules => f.write_str("rules"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    pub mode: SynthesisMode,
    /// Source images are shrunk by this factor before processing.
    pub resize: f32,
    /// Thresholds applied before synthesis in learned mode. They only gate
    /// which axes are offered to the classifier.
    pub before_classification: ScoreThresholds,
    /// Thresholds applied after learned synthesis, or as the only pruning
    /// pass in rules mode.
    pub after_classification: ScoreThresholds,
    /// Strongest axes per tile considered for splitting.
    pub max_axes_per_step: usize,
    /// Minimum tile size as a fraction of the processed image.
    pub min_size_fraction: f32,
    /// Recursion cap; `None` derives it from `min_size_fraction`.
    pub max_depth: Option<u32>,
    pub axis_similarity: AxisSimilarity,
    /// Sensitivity of rotation deduplication.
    pub rotation_similarity: f32,
    /// Score-balance factor of rule-based synthesis.
    pub circle_sym_threshold: f32,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            mode: SynthesisMode::Learned,
            resize: 4.0,
            before_classification: ScoreThresholds {
                score: 0.09,
                normalized: 0.35,
            },
            after_classification: ScoreThresholds {
                score: 0.20,
                normalized: 0.70,
            },
            max_axes_per_step: 3,
            min_size_fraction: 0.2,
            max_depth: None,
            axis_similarity: AxisSimilarity::default(),
            rotation_similarity: 3.0,
            circle_sym_threshold: 0.75,
        }
    }
}

impl EngineParams {
    /// Score a main axis must exceed to split its tile.
    pub fn split_threshold(&self) -> f32 {
        match self.mode {
            SynthesisMode::Learned => self.before_classification.score,
            SynthesisMode::Rules => self.after_classification.score,
        }
    }

    /// Thresholds of the pruning pass that runs before synthesis.
    pub fn pre_synthesis_thresholds(&self) -> ScoreThresholds {
        match self.mode {
            SynthesisMode::Learned => self.before_classification,
            SynthesisMode::Rules => self.after_classification,
        }
    }

    /// Thresholds of the pruning pass that runs after synthesis.
    pub fn post_synthesis_thresholds(&self) -> ScoreThresholds {
        self.after_classification
    }
}
