use std::path::{Path, PathBuf};

use thiserror::Error;

use fractalgen_core::CoreError;
use fractalgen_render::RenderError;

use crate::presets::PRESET_DOCUMENT;

/// Everything that can stop the command-line front end.
///
/// All variants are configuration or I/O problems; once a job's transform
/// and colormap are built, rendering itself cannot fail.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("when reading {}: {source}", .path.display())]
    Xml {
        path: PathBuf,
        source: roxmltree::Error,
    },

    #[error("no {} found (searched: {})", PRESET_DOCUMENT, join_paths(.searched))]
    PresetDocumentNotFound { searched: Vec<PathBuf> },

    #[error("Undefined preset name: {0}. See --cmaps for available presets.")]
    UnknownPreset(String),

    #[error("unknown colormap type {0:?} (expected \"gradient\" or \"rainbow\")")]
    UnknownColorMapType(String),

    #[error("<{element}> is missing `{attribute}`")]
    MissingAttribute { element: String, attribute: String },

    #[error("<{parent}> is missing required element <{element}>")]
    MissingElement { parent: String, element: String },

    #[error("invalid value {value:?} for `{name}`: expected {expected}")]
    InvalidValue {
        name: String,
        value: String,
        expected: &'static str,
    },

    #[error("no fractal with id {0:?} in the batch file")]
    NoMatchingJob(String),

    #[error("cannot save image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("cannot serialize report: {0}")]
    Report(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl AppError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
