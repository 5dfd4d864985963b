//! Machine-readable summary of a run, written with `--report`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use fractalgen_core::{FractalKind, ImageSize, TransformParams};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub id: String,
    pub save: PathBuf,
    pub fractal: FractalKind,
    pub size: ImageSize,
    pub transform: TransformParams,
    pub colormap: String,
    pub total_iterations: u64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Batch file the jobs came from; absent for a single command-line job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    pub jobs: Vec<JobReport>,
}

impl BatchReport {
    pub fn total_iterations(&self) -> u64 {
        self.jobs.iter().map(|j| j.total_iterations).sum()
    }
}

/// Write `report` as pretty-printed JSON.
pub fn write_report(report: &BatchReport, path: &Path) -> crate::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(|e| AppError::io(path, e))?;
    info!("Wrote report for {} job(s) to {}", report.jobs.len(), path.display());
    Ok(())
}
