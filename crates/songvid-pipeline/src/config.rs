//! Pipeline configuration.

use std::path::PathBuf;

/// Configuration for job orchestration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root directory under which each job gets its own subdirectory
    pub jobs_root: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            jobs_root: PathBuf::from("tmp/jobs"),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            jobs_root: std::env::var("JOBS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("tmp/jobs")),
        }
    }
}
