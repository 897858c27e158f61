//! The fixed transform stage set.
//!
//! Argument templates follow the stage contracts exactly: concat runs
//! in stream-copy mode, audio mux re-encodes only the audio stream and
//! trims to the shorter input, subtitles are hard-burned and therefore
//! always last.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::MediaResult;
use crate::runner::TransformRunner;

/// Named transform stages, in fixed dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Concat,
    Mux,
    Logo,
    Vertical,
    Subtitles,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Concat => "concat",
            Stage::Mux => "mux",
            Stage::Logo => "logo",
            Stage::Vertical => "vertical",
            Stage::Subtitles => "subtitles",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pixel offset of the logo overlay, measured from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoPosition {
    #[serde(default = "default_logo_offset")]
    pub x: u32,
    #[serde(default = "default_logo_offset")]
    pub y: u32,
}

impl Default for LogoPosition {
    fn default() -> Self {
        Self { x: 10, y: 10 }
    }
}

fn default_logo_offset() -> u32 {
    10
}

/// Target frame for the vertical reformat stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerticalResolution {
    #[serde(default = "default_vertical_width")]
    pub width: u32,
    #[serde(default = "default_vertical_height")]
    pub height: u32,
}

impl Default for VerticalResolution {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
        }
    }
}

fn default_vertical_width() -> u32 {
    1080
}

fn default_vertical_height() -> u32 {
    1920
}

fn arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Forward slashes for paths embedded in ffmpeg list files and filters.
fn normalize(path: &Path) -> String {
    arg(path).replace('\\', "/")
}

/// Concatenate clips in order into one continuous video without
/// re-encoding. Writes the stage-local list file first.
pub async fn concat_clips<R: TransformRunner>(
    runner: &R,
    clip_paths: &[PathBuf],
    concat_file: &Path,
    output: &Path,
) -> MediaResult<()> {
    let listing = clip_paths
        .iter()
        .map(|clip| format!("file '{}'", normalize(clip)))
        .collect::<Vec<_>>()
        .join("\n");
    tokio::fs::write(concat_file, listing).await?;

    info!(clips = clip_paths.len(), output = %output.display(), "Concatenating clips");

    runner
        .run(
            Stage::Concat,
            vec![
                "-f".into(),
                "concat".into(),
                "-safe".into(),
                "0".into(),
                "-i".into(),
                arg(concat_file),
                "-c".into(),
                "copy".into(),
                arg(output),
            ],
        )
        .await
}

/// Mux an audio track into the video, trimming to the shorter of the two.
pub async fn attach_audio<R: TransformRunner>(
    runner: &R,
    video: &Path,
    audio: &Path,
    output: &Path,
) -> MediaResult<()> {
    runner
        .run(
            Stage::Mux,
            vec![
                "-i".into(),
                arg(video),
                "-i".into(),
                arg(audio),
                "-c:v".into(),
                "copy".into(),
                "-c:a".into(),
                "aac".into(),
                "-shortest".into(),
                arg(output),
            ],
        )
        .await
}

/// Composite a static image onto every frame.
pub async fn overlay_logo<R: TransformRunner>(
    runner: &R,
    video: &Path,
    logo: &Path,
    output: &Path,
    position: LogoPosition,
) -> MediaResult<()> {
    runner
        .run(
            Stage::Logo,
            vec![
                "-i".into(),
                arg(video),
                "-i".into(),
                arg(logo),
                "-filter_complex".into(),
                format!("overlay={}:{}", position.x, position.y),
                "-codec:a".into(),
                "copy".into(),
                arg(output),
            ],
        )
        .await
}

/// Scale preserving aspect ratio and pad to a centered vertical frame.
pub async fn make_vertical<R: TransformRunner>(
    runner: &R,
    video: &Path,
    output: &Path,
    resolution: VerticalResolution,
) -> MediaResult<()> {
    let VerticalResolution { width, height } = resolution;
    let vf = format!(
        "scale={width}:{height}:force_original_aspect_ratio=decrease,pad={width}:{height}:(ow-iw)/2:(oh-ih)/2"
    );

    runner
        .run(
            Stage::Vertical,
            vec![
                "-i".into(),
                arg(video),
                "-vf".into(),
                vf,
                "-c:a".into(),
                "copy".into(),
                arg(output),
            ],
        )
        .await
}

/// Render subtitles directly into the video frames.
pub async fn burn_subtitles<R: TransformRunner>(
    runner: &R,
    video: &Path,
    subtitles: &Path,
    output: &Path,
) -> MediaResult<()> {
    runner
        .run(
            Stage::Subtitles,
            vec![
                "-i".into(),
                arg(video),
                "-vf".into(),
                format!("subtitles={}", normalize(subtitles)),
                arg(output),
            ],
        )
        .await
}
