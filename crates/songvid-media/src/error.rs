//! Error types for media operations.

use thiserror::Error;

use crate::stages::Stage;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while running a transform stage.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("{stage} stage failed: ffmpeg exited with code {code:?}")]
    FfmpegFailed {
        stage: Stage,
        code: Option<i32>,
        stderr: Option<String>,
    },

    #[error("{stage} stage failed to start ffmpeg: {source}")]
    SpawnFailed {
        stage: Stage,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// The transform stage this error originated from, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            MediaError::FfmpegFailed { stage, .. } | MediaError::SpawnFailed { stage, .. } => {
                Some(*stage)
            }
            _ => None,
        }
    }
}
