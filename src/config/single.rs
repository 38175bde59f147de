use super::{read_json, EngineConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct SingleToolConfig {
    pub input: PathBuf,
    /// Full [`SymmetryReport`](crate::diagnostics::SymmetryReport) as JSON.
    pub report_json: PathBuf,
    #[serde(flatten)]
    pub engine: EngineConfig,
}

pub fn load_config(path: &Path) -> Result<SingleToolConfig, String> {
    read_json(path)
}
