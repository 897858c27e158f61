//! External transform execution.

use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};
use crate::stages::Stage;

/// Runs one external transform to completion.
///
/// The pipeline only ever goes through this trait to touch ffmpeg, so
/// tests can substitute a fake that returns canned results.
pub trait TransformRunner: Send + Sync {
    /// Run `ffmpeg <args>` for the named stage and wait for it to exit.
    fn run(&self, stage: Stage, args: Vec<String>) -> impl Future<Output = MediaResult<()>> + Send;
}

/// [`TransformRunner`] backed by the system ffmpeg binary.
pub struct FfmpegRunner {
    ffmpeg: PathBuf,
}

impl FfmpegRunner {
    /// Locate ffmpeg in `PATH`.
    pub fn new() -> MediaResult<Self> {
        let ffmpeg = which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;
        Ok(Self { ffmpeg })
    }

    /// Use an explicit ffmpeg binary path.
    pub fn with_binary(ffmpeg: PathBuf) -> Self {
        Self { ffmpeg }
    }
}

impl TransformRunner for FfmpegRunner {
    async fn run(&self, stage: Stage, args: Vec<String>) -> MediaResult<()> {
        debug!(stage = %stage, ?args, "Launching ffmpeg");

        let output = Command::new(&self.ffmpeg)
            .arg("-y")
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| MediaError::SpawnFailed { stage, source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            warn!(stage = %stage, code = ?output.status.code(), "ffmpeg failed");
            return Err(MediaError::FfmpegFailed {
                stage,
                code: output.status.code(),
                stderr: Some(stderr),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires ffmpeg in PATH"]
    async fn test_ffmpeg_is_discoverable() {
        FfmpegRunner::new().expect("ffmpeg should be in PATH");
    }

    #[tokio::test]
    async fn test_spawn_failure_names_the_stage() {
        let runner = FfmpegRunner::with_binary(PathBuf::from("/nonexistent/ffmpeg"));
        let err = runner.run(Stage::Concat, vec![]).await.unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Concat));
    }
}
