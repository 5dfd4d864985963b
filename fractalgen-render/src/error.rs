use std::path::PathBuf;

use thiserror::Error;

/// Errors originating from the rendering and export pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}
