use super::RotationClassifier;
use crate::error::ClassifierError;
use crate::features::{FeatureVector, FEATURE_COUNT};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Node of a decision tree. Splits send `x[feature] <= threshold` left.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ForestNode {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Positive-class probability.
        value: f32,
    },
}

/// Flat tree; node 0 is the root and children always follow their parent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<ForestNode>,
}

impl DecisionTree {
    fn validate(&self, tree_index: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err(format!("tree {tree_index} has no nodes"));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            if let ForestNode::Split {
                feature,
                left,
                right,
                ..
            } = *node
            {
                if feature >= FEATURE_COUNT {
                    return Err(format!(
                        "tree {tree_index} node {idx}: feature {feature} out of range (max {})",
                        FEATURE_COUNT - 1
                    ));
                }
                for child in [left, right] {
                    if child <= idx || child >= self.nodes.len() {
                        return Err(format!(
                            "tree {tree_index} node {idx}: invalid child link {child}"
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Leaf value reached by `x`. Terminates because links point forward.
    fn evaluate(&self, x: &[f32; FEATURE_COUNT]) -> f32 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                ForestNode::Leaf { value } => return value,
                ForestNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

fn default_threshold() -> f32 {
    0.5
}

#[derive(Deserialize)]
struct ForestModel {
    trees: Vec<DecisionTree>,
    #[serde(default = "default_threshold")]
    threshold: f32,
}

/// Averaging decision forest: positive when the mean leaf value exceeds
/// `threshold`.
#[derive(Clone, Debug, PartialEq)]
pub struct ForestClassifier {
    trees: Vec<DecisionTree>,
    threshold: f32,
}

impl ForestClassifier {
    /// Build a validated forest.
    pub fn new(trees: Vec<DecisionTree>, threshold: f32) -> Result<Self, String> {
        if trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (idx, tree) in trees.iter().enumerate() {
            tree.validate(idx)?;
        }
        Ok(Self { trees, threshold })
    }

    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let model: ForestModel =
            serde_json::from_str(json).map_err(|e| format!("Invalid forest model: {e}"))?;
        Self::new(model.trees, model.threshold)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, String> {
        let data = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read model {}: {e}", path.display()))?;
        let forest = Self::from_json_str(&data).map_err(|e| format!("{}: {e}", path.display()))?;
        debug!(
            "ForestClassifier loaded {} trees from {} (threshold={:.3})",
            forest.trees.len(),
            path.display(),
            forest.threshold
        );
        Ok(forest)
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Mean positive-class probability over all trees.
    pub fn probability(&self, x: &[f32; FEATURE_COUNT]) -> f32 {
        let sum: f32 = self.trees.iter().map(|tree| tree.evaluate(x)).sum();
        sum / self.trees.len() as f32
    }
}

impl RotationClassifier for ForestClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<bool, ClassifierError> {
        let x = features.values();
        if let Some(idx) = x.iter().position(|v| !v.is_finite()) {
            return Err(ClassifierError::new(format!(
                "non-finite feature at column {idx}"
            )));
        }
        Ok(self.probability(&x) > self.threshold)
    }
}
