//! Generation client error types.

use thiserror::Error;

pub type GenResult<T> = Result<T, GenError>;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("Backend returned {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("Malformed backend response: {0}")]
    MalformedBody(String),

    #[error("Base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenError {
    /// HTTP status of the failed backend call, if this was a backend error.
    pub fn status(&self) -> Option<u16> {
        match self {
            GenError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}
