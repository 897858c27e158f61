//! Generation backend wire types.

use serde::{Deserialize, Serialize};

use songvid_models::GenerationParams;

/// Request body sent to the generation backend.
#[derive(Debug, Clone, Serialize)]
pub struct BackendRequest<'a> {
    pub prompt: &'a str,
    pub num_frames: u32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub guidance_scale: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<&'a str>,
}

impl<'a> BackendRequest<'a> {
    pub fn new(prompt: &'a str, params: &'a GenerationParams) -> Self {
        Self {
            prompt,
            num_frames: params.num_frames,
            width: params.width,
            height: params.height,
            fps: params.fps,
            guidance_scale: params.guidance_scale,
            image_base64: params.image_base64.as_deref(),
        }
    }
}

/// JSON-flavored backend response: a success flag plus the clip as a
/// base64 payload (optionally a `data:` URL).
#[derive(Debug, Clone, Deserialize)]
pub struct BackendVideoResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    pub video: Option<String>,
}

fn default_success() -> bool {
    true
}

impl BackendVideoResponse {
    /// The base64 portion of the `video` payload, with any `data:` URL
    /// prefix stripped.
    pub fn video_base64(&self) -> Option<&str> {
        let video = self.video.as_deref()?;
        match video.split_once(";base64,") {
            Some((_, payload)) => Some(payload),
            None => Some(video),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_prefix_stripped() {
        let response = BackendVideoResponse {
            success: true,
            video: Some("data:video/mp4;base64,AAAA".to_string()),
        };
        assert_eq!(response.video_base64(), Some("AAAA"));
    }

    #[test]
    fn test_bare_base64_passes_through() {
        let response = BackendVideoResponse {
            success: true,
            video: Some("AAAA".to_string()),
        };
        assert_eq!(response.video_base64(), Some("AAAA"));
    }

    #[test]
    fn test_success_defaults_to_true() {
        let response: BackendVideoResponse = serde_json::from_str(r#"{"video":"AAAA"}"#).unwrap();
        assert!(response.success);
    }
}
