//! JSON configuration of the command-line tools.
//!
//! - [`batch`]: directory-wide runs (`symmetry_batch`).
//! - [`single`]: one image with a full diagnostics report (`symmetry_single`).
//!
//! Both embed an [`EngineConfig`] naming the detector options, the engine
//! parameters and the optional classifier model.

pub mod batch;
pub mod single;

use crate::classify::ForestClassifier;
use crate::detect::{MirrorDetector, MirrorDetectorOptions};
use crate::engine::{EngineParams, SymmetryEngine, SynthesisMode};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Forest model for learned synthesis (JSON, see `ForestClassifier`).
    pub model_path: Option<PathBuf>,
    pub detector: MirrorDetectorOptions,
    pub params: EngineParams,
}

impl EngineConfig {
    /// Build an engine with the baseline mirror detector.
    ///
    /// Learned mode without a model is rejected here rather than on the
    /// first image.
    pub fn build_engine(&self) -> Result<SymmetryEngine, String> {
        let detector = MirrorDetector::new(self.detector.clone());
        let engine = SymmetryEngine::new(self.params.clone(), detector);
        match (&self.model_path, self.params.mode) {
            (Some(path), _) => {
                let forest = ForestClassifier::from_json_file(path)?;
                debug!("EngineConfig: classifier from {}", path.display());
                Ok(engine.with_classifier(forest))
            }
            (None, SynthesisMode::Learned) => {
                Err("Learned mode requires `model_path` (or set mode to \"rules\")".to_string())
            }
            (None, SynthesisMode::Rules) => Ok(engine),
        }
    }
}

pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
