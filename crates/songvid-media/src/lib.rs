//! FFmpeg CLI wrapper for the post-generation transform stages.
//!
//! Each stage is a function over file paths that shells out to ffmpeg
//! through the [`TransformRunner`] trait. The pipeline crate drives the
//! stages with the real [`FfmpegRunner`]; tests substitute a fake
//! runner and never launch a subprocess.

pub mod error;
pub mod runner;
pub mod stages;

pub use error::{MediaError, MediaResult};
pub use runner::{FfmpegRunner, TransformRunner};
pub use stages::{
    attach_audio, burn_subtitles, concat_clips, make_vertical, overlay_logo, LogoPosition, Stage,
    VerticalResolution,
};
