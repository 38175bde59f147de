//! Binary classifier deciding whether an axis pair forms a rotation.
//!
//! The engine only depends on [`RotationClassifier`]; [`ForestClassifier`]
//! is a decision-forest implementation loaded from a JSON model file.

mod forest;

pub use forest::{DecisionTree, ForestClassifier, ForestNode};

use crate::error::ClassifierError;
use crate::features::FeatureVector;

/// Opaque binary classifier over pairwise features.
pub trait RotationClassifier {
    /// `true` when the pair is judged to be a rotational symmetry.
    fn predict(&self, features: &FeatureVector) -> Result<bool, ClassifierError>;
}

impl<F> RotationClassifier for F
where
    F: Fn(&FeatureVector) -> Result<bool, ClassifierError>,
{
    fn predict(&self, features: &FeatureVector) -> Result<bool, ClassifierError> {
        self(features)
    }
}
