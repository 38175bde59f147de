use super::{PairCollector, RotationSynthesizer, Synthesis};
use crate::classify::RotationClassifier;
use crate::error::SymmetryError;
use crate::features::FeatureVector;
use crate::geometry::line_intersect;
use crate::types::{ImageDims, ReflectionAxis};
use log::debug;

/// Learned pairing: every intersecting pair is judged by a classifier.
pub struct ClassifierSynthesizer<'a, C: ?Sized> {
    classifier: &'a C,
}

impl<'a, C: RotationClassifier + ?Sized> ClassifierSynthesizer<'a, C> {
    pub fn new(classifier: &'a C) -> Self {
        Self { classifier }
    }
}

impl<C: RotationClassifier + ?Sized> RotationSynthesizer for ClassifierSynthesizer<'_, C> {
    fn synthesize(
        &self,
        axes: Vec<ReflectionAxis>,
        dims: ImageDims,
    ) -> Result<Synthesis, SymmetryError> {
        let mut collector = PairCollector::default();
        for i in 0..axes.len() {
            for j in (i + 1)..axes.len() {
                let (a, b) = (&axes[i], &axes[j]);
                let Some(center) = line_intersect((a.p0, a.p1), (b.p0, b.p1)) else {
                    continue;
                };
                collector.pairs_evaluated += 1;
                let features = FeatureVector::from_pair(a, b, dims);
                if self.classifier.predict(&features)? {
                    collector.accept(a, b, center);
                }
            }
        }
        let out = collector.finish(axes);
        debug!(
            "ClassifierSynthesizer: pairs={} accepted={} axes_left={}",
            out.pairs_evaluated,
            out.pairs_accepted,
            out.axes.len()
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifierError;
    use crate::geometry::slope;
    use crate::types::AxisId;
    use std::cell::Cell;

    const DIMS: ImageDims = ImageDims {
        width: 100.0,
        height: 100.0,
    };

    fn axis(id: u32, p0: [f32; 2], p1: [f32; 2]) -> ReflectionAxis {
        ReflectionAxis {
            id: AxisId(id),
            p0,
            p1,
            slope: slope(p0, p1, DIMS.height),
            score: 0.5,
            normalized_score: 1.0,
            depth: 0,
        }
    }

    fn cross() -> Vec<ReflectionAxis> {
        vec![
            axis(0, [50.0, 0.0], [50.0, 100.0]),
            axis(1, [0.0, 50.0], [100.0, 50.0]),
            axis(2, [70.0, 0.0], [70.0, 40.0]),
        ]
    }

    #[test]
    fn only_intersecting_pairs_reach_the_classifier() {
        let calls = Cell::new(0usize);
        let classifier = |features: &FeatureVector| -> Result<bool, ClassifierError> {
            calls.set(calls.get() + 1);
            assert!(features.intersects);
            Ok(true)
        };
        let out = ClassifierSynthesizer::new(&classifier)
            .synthesize(cross(), DIMS)
            .unwrap();
        assert_eq!(calls.get(), 1, "axis 2 intersects neither of the others");
        assert_eq!(out.pairs_evaluated, 1);
        assert_eq!(out.rotations.len(), 1);
        assert_eq!(out.rotations[0].center, [50.0, 50.0]);
        let ids: Vec<u32> = out.axes.iter().map(|a| a.id.0).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn negative_predictions_keep_the_axes() {
        let classifier = |_: &FeatureVector| -> Result<bool, ClassifierError> { Ok(false) };
        let out = ClassifierSynthesizer::new(&classifier)
            .synthesize(cross(), DIMS)
            .unwrap();
        assert!(out.rotations.is_empty());
        assert_eq!(out.axes.len(), 3);
    }

    #[test]
    fn classifier_errors_propagate() {
        let classifier = |_: &FeatureVector| -> Result<bool, ClassifierError> {
            Err(ClassifierError::new("model not loaded"))
        };
        let err = ClassifierSynthesizer::new(&classifier)
            .synthesize(cross(), DIMS)
            .unwrap_err();
        assert_eq!(
            err,
            SymmetryError::Classifier(ClassifierError::new("model not loaded"))
        );
    }

    #[test]
    fn axes_shared_by_several_rotations_leave_exactly_once() {
        // Three axes crossing at (50, 50) plus one that meets none of them.
        let axes = vec![
            axis(0, [50.0, 0.0], [50.0, 100.0]),
            axis(1, [0.0, 50.0], [100.0, 50.0]),
            axis(2, [0.0, 0.0], [100.0, 100.0]),
            axis(3, [70.0, 0.0], [70.0, 40.0]),
        ];
        let classifier = |_: &FeatureVector| -> Result<bool, ClassifierError> { Ok(true) };
        let out = ClassifierSynthesizer::new(&classifier)
            .synthesize(axes, DIMS)
            .unwrap();
        assert_eq!(out.pairs_evaluated, 3);
        assert_eq!(out.rotations.len(), 3);
        let ids: Vec<u32> = out.axes.iter().map(|a| a.id.0).collect();
        assert_eq!(ids, vec![3], "each consumed axis is removed once, the rest kept");
        for id in 0..3 {
            let uses = out
                .rotations
                .iter()
                .filter(|r| r.axes.contains(&AxisId(id)))
                .count();
            assert_eq!(uses, 2, "axis {id} supports two rotations");
        }
    }
}
