use super::{read_json, EngineConfig};
use crate::batch::BatchOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn default_extension() -> String {
    ".jpg".to_string()
}

#[derive(Debug, Deserialize)]
pub struct BatchToolConfig {
    pub input_dir: PathBuf,
    /// File-name suffix selecting the images of `input_dir`.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// One `<stem>.json` report per image plus `summary.json`.
    pub output_dir: PathBuf,
    #[serde(default)]
    pub batch: BatchOptions,
    #[serde(flatten)]
    pub engine: EngineConfig,
}

pub fn load_config(path: &Path) -> Result<BatchToolConfig, String> {
    read_json(path)
}
