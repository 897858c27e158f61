//! Per-job output manifest.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::generation::GenerationParams;
use crate::job::JobId;
use crate::shot::Shot;

/// The rendered clip produced for one shot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipRecord {
    /// The shot this clip was generated for
    #[serde(flatten)]
    pub shot: Shot,

    /// Path of the clip file inside the job's `clips/` directory
    pub file_path: PathBuf,

    /// Size of the clip file in bytes
    pub bytes: u64,

    /// Generation parameters actually sent to the backend
    pub params: GenerationParams,

    /// Backend model identifier used for this clip
    pub model: String,
}

/// Resolved artifact paths for one job.
///
/// Each stage path is `None` when the stage was skipped; a `Some` path
/// always points to an existing file inside `job_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOutputs {
    pub job_dir: PathBuf,
    pub clips_dir: PathBuf,
    pub concat_file_path: PathBuf,
    pub stitched_video_path: Option<PathBuf>,
    pub with_audio_path: Option<PathBuf>,
    pub with_logo_path: Option<PathBuf>,
    pub vertical_path: Option<PathBuf>,
    pub subtitles_path: Option<PathBuf>,
    pub clips: Vec<ClipRecord>,
}

impl JobOutputs {
    /// Start a fresh output record for a job directory.
    pub fn new(job_dir: PathBuf, clips_dir: PathBuf, concat_file_path: PathBuf) -> Self {
        Self {
            job_dir,
            clips_dir,
            concat_file_path,
            stitched_video_path: None,
            with_audio_path: None,
            with_logo_path: None,
            vertical_path: None,
            subtitles_path: None,
            clips: Vec::new(),
        }
    }

    /// The most recent non-null stage output, in stage order.
    pub fn latest_video(&self) -> Option<&PathBuf> {
        self.subtitles_path
            .as_ref()
            .or(self.vertical_path.as_ref())
            .or(self.with_logo_path.as_ref())
            .or(self.with_audio_path.as_ref())
            .or(self.stitched_video_path.as_ref())
    }
}

/// The persisted record of a completed job.
///
/// Written exactly once, on full success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobManifest {
    pub job_id: JobId,
    pub created_at: DateTime<Utc>,
    pub lyrics_provided: bool,
    pub song_duration_sec: f64,
    pub clip_duration_sec: f64,
    pub base_style: String,
    pub extra_style: Vec<String>,
    pub generation: GenerationParams,
    pub outputs: JobOutputs,
}
