//! Generation backend parameters and model selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Parameters for one clip generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Number of frames to generate
    #[serde(default = "default_num_frames")]
    pub num_frames: u32,

    /// Output width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Output height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Frames per second
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Guidance strength
    #[serde(default = "default_guidance")]
    pub guidance_scale: f64,

    /// Optional base64-encoded conditioning image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            num_frames: default_num_frames(),
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            guidance_scale: default_guidance(),
            image_base64: None,
        }
    }
}

impl GenerationParams {
    /// Frame count covering `seconds` of output at `fps`.
    pub fn frames_for_duration(seconds: f64, fps: u32) -> u32 {
        (seconds * fps as f64).round().max(1.0) as u32
    }
}

fn default_num_frames() -> u32 {
    96
}

fn default_width() -> u32 {
    1216
}

fn default_height() -> u32 {
    704
}

fn default_fps() -> u32 {
    24
}

fn default_guidance() -> f64 {
    1.0
}

/// Supported generation backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// LTX-Video
    #[default]
    Ltx,
    /// Mochi
    Mochi,
    /// CogVideo
    Cog,
}

impl ModelKind {
    pub const ALL: &'static [ModelKind] = &[ModelKind::Ltx, ModelKind::Mochi, ModelKind::Cog];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Ltx => "ltx",
            ModelKind::Mochi => "mochi",
            ModelKind::Cog => "cog",
        }
    }

    /// Path segment under the GPU base URL for this model.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            ModelKind::Ltx => "/generate/ltx",
            ModelKind::Mochi => "/generate/mochi",
            ModelKind::Cog => "/generate/cog",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = ModelKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ltx" => Ok(ModelKind::Ltx),
            "mochi" => Ok(ModelKind::Mochi),
            "cog" | "cogvideo" => Ok(ModelKind::Cog),
            _ => Err(ModelKindParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown model: {0}")]
pub struct ModelKindParseError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_parse() {
        assert_eq!("ltx".parse::<ModelKind>().unwrap(), ModelKind::Ltx);
        assert_eq!("cogvideo".parse::<ModelKind>().unwrap(), ModelKind::Cog);
        assert!("sora".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_frames_for_duration() {
        assert_eq!(GenerationParams::frames_for_duration(15.0, 24), 360);
        assert_eq!(GenerationParams::frames_for_duration(0.0, 24), 1);
    }

    #[test]
    fn test_params_defaults() {
        let params = GenerationParams::default();
        assert_eq!(params.num_frames, 96);
        assert_eq!(params.width, 1216);
        assert_eq!(params.height, 704);
        assert_eq!(params.fps, 24);
    }
}
