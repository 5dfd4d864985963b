use thiserror::Error;

/// Errors raised while building core values from caller-supplied parameters.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid image size: {width}×{height} (both dimensions must be >= 1)")]
    InvalidImageSize { width: u32, height: u32 },

    #[error("invalid transform: {reason}")]
    InvalidTransform { reason: String },
}
