//! Directory-wide processing, one engine call per image.
//!
//! Images share no state, so with [`BatchOptions::parallel`] they are fanned
//! out over the rayon pool; each image is still processed sequentially. A
//! failing image is recorded in its [`BatchItem`] and the batch continues.

use crate::diagnostics::SymmetryReport;
use crate::engine::SymmetryEngine;
use crate::error::SymmetryError;
use crate::image::io::{load_rgb_image, write_json_file};
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    pub parallel: bool,
}

/// Outcome of one input image.
#[derive(Debug)]
pub struct BatchItem {
    pub input: PathBuf,
    pub outcome: Result<SymmetryReport, SymmetryError>,
}

/// Load `path` and run the engine on it in source pixel space.
pub fn process_path(engine: &SymmetryEngine, path: &Path) -> Result<SymmetryReport, SymmetryError> {
    let image = load_rgb_image(path).map_err(SymmetryError::Image)?;
    engine.process_source(&image)
}

/// Process every path in `inputs`; the output keeps the input order.
pub fn run_batch(
    engine: &SymmetryEngine,
    inputs: &[PathBuf],
    options: &BatchOptions,
) -> Vec<BatchItem> {
    let total = inputs.len();
    let run_one = |(idx, path): (usize, &PathBuf)| {
        let outcome = process_path(engine, path);
        match &outcome {
            Ok(report) => info!(
                "{} [{}/{}] axes={} rotations={} latency_ms={:.1}",
                path.display(),
                idx + 1,
                total,
                report.result.axes.len(),
                report.result.rotations.len(),
                report.result.latency_ms
            ),
            Err(err) => warn!("{} [{}/{}] failed: {err}", path.display(), idx + 1, total),
        }
        BatchItem {
            input: path.clone(),
            outcome,
        }
    };
    if options.parallel {
        inputs.par_iter().enumerate().map(run_one).collect()
    } else {
        inputs.iter().enumerate().map(run_one).collect()
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemSummary {
    pub input: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
    pub axes: usize,
    pub rotations: usize,
    pub latency_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
    pub items: Vec<BatchItemSummary>,
}

/// Report path for `input` inside `output_dir`.
pub fn report_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    output_dir.join(format!("{stem}.json"))
}

/// Write one report per successful item and return the batch summary.
///
/// Write failures are fatal, unlike processing failures.
pub fn write_reports(items: &[BatchItem], output_dir: &Path) -> Result<BatchSummary, String> {
    let mut summaries = Vec::with_capacity(items.len());
    for item in items {
        let summary = match &item.outcome {
            Ok(report) => {
                let path = report_path(output_dir, &item.input);
                write_json_file(&path, report)?;
                BatchItemSummary {
                    input: item.input.clone(),
                    report: Some(path),
                    axes: report.result.axes.len(),
                    rotations: report.result.rotations.len(),
                    latency_ms: report.result.latency_ms,
                    error: None,
                }
            }
            Err(err) => BatchItemSummary {
                input: item.input.clone(),
                report: None,
                axes: 0,
                rotations: 0,
                latency_ms: 0.0,
                error: Some(err.to_string()),
            },
        };
        summaries.push(summary);
    }
    let failed = summaries.iter().filter(|s| s.error.is_some()).count();
    Ok(BatchSummary {
        processed: summaries.len() - failed,
        failed,
        items: summaries,
    })
}
