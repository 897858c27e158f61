//! Pipeline error types.

use thiserror::Error;

use songvid_gen::GenError;
use songvid_media::MediaError;
use songvid_queue::QueueError;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Terminal failure of a job. Lower-level errors propagate unchanged;
/// already-produced artifacts stay on disk and no manifest is written.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid song request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),

    #[error("Shot {shot} failed: {source}")]
    ShotFailed {
        shot: u32,
        #[source]
        source: GenError,
    },

    #[error("Transform stage failed: {0}")]
    Media(#[from] MediaError),

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
