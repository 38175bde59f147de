use crate::types::ReflectionAxis;
use log::debug;
use serde::{Deserialize, Serialize};

/// Score / normalized-score pair used by one pruning pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreThresholds {
    /// Minimum raw score of a primary axis; below it the sibling group goes.
    pub score: f32,
    /// Minimum normalized score of any axis.
    pub normalized: f32,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            score: 0.20,
            normalized: 0.70,
        }
    }
}

/// Remove weak axes and the sibling groups of weak primaries.
///
/// Walking the flattened order:
/// - an axis with `normalized_score < thresholds.normalized` is removed;
/// - a primary axis (`normalized_score == 1.0`) with
///   `score < thresholds.score` is removed together with every immediately
///   following axis of exactly the same depth, stopping at the first axis of
///   a different depth.
pub fn prune_by_threshold(
    axes: Vec<ReflectionAxis>,
    thresholds: ScoreThresholds,
) -> Vec<ReflectionAxis> {
    let mut keep = vec![true; axes.len()];
    let mut groups_dropped = 0usize;

    for i in 0..axes.len() {
        if !keep[i] {
            continue;
        }
        let axis = &axes[i];
        if axis.normalized_score < thresholds.normalized {
            keep[i] = false;
        } else if axis.is_primary() && axis.score < thresholds.score {
            keep[i] = false;
            groups_dropped += 1;
            let mut j = i + 1;
            while j < axes.len() && axes[j].depth == axis.depth {
                keep[j] = false;
                j += 1;
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
        "prune_by_threshold score>={:.3} norm>={:.3}: kept {}/{} (groups dropped={})",
        thresholds.score,
        thresholds.normalized,
        kept.len(),
        total,
        groups_dropped
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AxisId;

    fn axis(id: u32, score: f32, normalized: f32, depth: u32) -> ReflectionAxis {
        ReflectionAxis {
            id: AxisId(id),
            p0: [0.0, 0.0],
            p1: [10.0, 0.0],
            slope: 0.0,
            score,
            normalized_score: normalized,
            depth,
        }
    }

    fn ids(axes: &[ReflectionAxis]) -> Vec<u32> {
        axes.iter().map(|a| a.id.0).collect()
    }

    const THRESHOLDS: ScoreThresholds = ScoreThresholds {
        score: 0.2,
        normalized: 0.7,
    };

    #[test]
    fn weak_primary_removes_its_whole_group_only() {
        let axes = vec![
            axis(0, 0.9, 1.0, 0),
            axis(1, 0.8, 0.9, 0),
            axis(2, 0.1, 1.0, 1), // weak primary
            axis(3, 0.5, 0.95, 1),
            axis(4, 0.4, 0.9, 1),
            axis(5, 0.7, 1.0, 2),
            axis(6, 0.6, 0.8, 2),
        ];
        let kept = prune_by_threshold(axes, THRESHOLDS);
        assert_eq!(ids(&kept), vec![0, 1, 5, 6]);
    }

    #[test]
    fn removal_stops_at_first_different_depth() {
        let axes = vec![
            axis(0, 0.1, 1.0, 1),
            axis(1, 0.9, 0.9, 1),
            axis(2, 0.9, 1.0, 2),
            axis(3, 0.9, 0.9, 1),
        ];
        let kept = prune_by_threshold(axes, THRESHOLDS);
        assert_eq!(ids(&kept), vec![2, 3], "later same-depth axes after a gap survive");
    }

    #[test]
    fn low_normalized_scores_are_dropped_individually() {
        let axes = vec![
            axis(0, 0.9, 1.0, 0),
            axis(1, 0.9, 0.5, 0),
            axis(2, 0.05, 0.6, 0),
            axis(3, 0.3, 0.75, 0),
        ];
        let kept = prune_by_threshold(axes, THRESHOLDS);
        assert_eq!(ids(&kept), vec![0, 3]);
    }

    #[test]
    fn weak_non_primary_does_not_trigger_group_removal() {
        let axes = vec![axis(0, 0.9, 1.0, 0), axis(1, 0.01, 0.8, 0), axis(2, 0.4, 0.9, 0)];
        let kept = prune_by_threshold(axes, THRESHOLDS);
        assert_eq!(ids(&kept), vec![0, 1, 2]);
    }

    #[test]
    fn identical_axes_are_tracked_by_position() {
        let a = axis(0, 0.1, 1.0, 0);
        let mut b = a.clone();
        b.id = AxisId(1);
        b.depth = 1;
        b.score = 0.9;
        let kept = prune_by_threshold(vec![a.clone(), a, b], THRESHOLDS);
        assert_eq!(ids(&kept), vec![1]);
    }
}
