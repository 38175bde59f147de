//! Rotational-symmetry synthesis from pairs of reflection axes.
//!
//! Two strategies share one contract ([`RotationSynthesizer`]):
//! - [`ClassifierSynthesizer`] submits the [`FeatureVector`](crate::features::FeatureVector)
//!   of every intersecting pair to a [`RotationClassifier`](crate::classify::RotationClassifier);
//! - [`RuleSynthesizer`] applies fixed geometric rules (comparable scores,
//!   perpendicular slopes, an intersection roughly equidistant from all four
//!   endpoints).
//!
//! An accepted pair becomes a [`RotationalSymmetry`] centred at the
//! intersection, with the smallest endpoint distance as radius. Both axes of
//! an accepted pair are consumed: they are marked while pairing continues and
//! removed once after the last pair, so an axis may still support several
//! rotations but leaves the surviving set exactly once.

mod classifier;
mod dedup;
mod rules;

pub use classifier::ClassifierSynthesizer;
pub use dedup::deduplicate_rotations;
pub use rules::RuleSynthesizer;

use crate::error::SymmetryError;
use crate::geometry::min_distance;
use crate::types::{AxisId, ImageDims, ReflectionAxis, RotationId, RotationalSymmetry};
use serde::Serialize;
use std::collections::HashSet;

/// Output of one synthesis pass.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Synthesis {
    /// Axes that did not contribute to any rotation, in input order.
    pub axes: Vec<ReflectionAxis>,
    pub rotations: Vec<RotationalSymmetry>,
    pub pairs_evaluated: usize,
    pub pairs_accepted: usize,
}

/// Strategy turning a set of reflection axes into rotational symmetries.
pub trait RotationSynthesizer {
    fn synthesize(
        &self,
        axes: Vec<ReflectionAxis>,
        dims: ImageDims,
    ) -> Result<Synthesis, SymmetryError>;
}

/// Collects accepted pairs and the axes they consume.
#[derive(Default)]
struct PairCollector {
    rotations: Vec<RotationalSymmetry>,
    consumed: HashSet<AxisId>,
    pairs_evaluated: usize,
}

impl PairCollector {
    fn accept(&mut self, a: &ReflectionAxis, b: &ReflectionAxis, center: [f32; 2]) {
        let id = RotationId(self.rotations.len() as u32);
        self.rotations.push(RotationalSymmetry {
            id,
            center,
            radius: min_distance(center, (a.p0, a.p1), (b.p0, b.p1)),
            mean_depth: (a.depth + b.depth) as f32 / 2.0,
            axes: [a.id, b.id],
        });
        self.consumed.insert(a.id);
        self.consumed.insert(b.id);
    }

    fn finish(self, axes: Vec<ReflectionAxis>) -> Synthesis {
        let PairCollector {
            rotations,
            consumed,
            pairs_evaluated,
        } = self;
        let axes = axes
            .into_iter()
            .filter(|axis| !consumed.contains(&axis.id))
            .collect();
        Synthesis {
            axes,
            pairs_accepted: rotations.len(),
            rotations,
            pairs_evaluated,
        }
    }
}
