//! Song structure and style definitions.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Visual style appended to every templated shot prompt unless the
/// caller overrides it.
pub const DEFAULT_BASE_STYLE: &str =
    "cinematic, mediterranean vibe, soft warm light, realistic, 30fps, high quality, filmed on Alexa Mini";

/// One section of a song's structure.
///
/// A section with `repeat = n` expands into `n` consecutive shot
/// instances sharing the same label stem.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Section {
    /// Section name ("intro", "verse", "chorus", "bridge", "outro" or custom)
    pub key: String,

    /// Planned duration in seconds. Falls back to the song's default
    /// clip duration when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub duration_sec: Option<f64>,

    /// Number of consecutive instances this section expands to (floored at 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<u32>,

    /// Literal prompt override; used verbatim instead of the key template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Human-readable label override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Section {
    /// Create a section with just a key and duration.
    pub fn new(key: impl Into<String>, duration_sec: f64) -> Self {
        Self {
            key: key.into(),
            duration_sec: Some(duration_sec),
            repeat: None,
            prompt: None,
            label: None,
        }
    }

    /// Set the repeat count.
    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = Some(repeat);
        self
    }

    /// Effective repeat count, floored at 1.
    pub fn repeat_count(&self) -> u32 {
        self.repeat.unwrap_or(1).max(1)
    }
}

/// Caller-supplied description of the song to render.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SongSpec {
    /// Full lyrics text; blank-line-separated blocks are cycled across shots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,

    /// Target song duration in seconds
    #[serde(default = "default_song_duration")]
    #[validate(range(min = 0.0))]
    pub song_duration_sec: f64,

    /// Default duration of one generated clip in seconds
    #[serde(default = "default_clip_duration")]
    #[validate(range(exclusive_min = 0.0))]
    pub clip_duration_sec: f64,

    /// Explicit song structure; the built-in template is used when absent or empty
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub structure: Option<Vec<Section>>,

    /// Base visual style appended to templated prompts
    #[serde(default = "default_base_style")]
    pub base_style: String,

    /// Extra style tags, comma-joined after the base style
    #[serde(default)]
    pub extra_style: Vec<String>,
}

impl Default for SongSpec {
    fn default() -> Self {
        Self {
            lyrics: None,
            song_duration_sec: default_song_duration(),
            clip_duration_sec: default_clip_duration(),
            structure: None,
            base_style: default_base_style(),
            extra_style: Vec::new(),
        }
    }
}

fn default_song_duration() -> f64 {
    210.0
}

fn default_clip_duration() -> f64 {
    6.0
}

fn default_base_style() -> String {
    DEFAULT_BASE_STYLE.to_string()
}

/// The built-in intro/verse/chorus/bridge/outro song structure.
pub fn default_structure() -> Vec<Section> {
    vec![
        Section::new("intro", 5.0),
        Section::new("verse", 10.0).with_repeat(2),
        Section::new("chorus", 8.0),
        Section::new("verse", 10.0).with_repeat(2),
        Section::new("bridge", 8.0),
        Section::new("chorus", 8.0),
        Section::new("outro", 6.0),
    ]
}

/// Prompt template for a section key.
///
/// Unknown keys resolve to the fallback template; this is a deliberate
/// default case, not a lookup miss.
pub fn prompt_template(key: &str) -> &'static str {
    match key {
        "intro" => "intro shot, studio lights, KRSTUDIO logo reveal, subtle motion",
        "verse" => "emotional verse scene, night city street, intimate lonely mood",
        "chorus" => "chorus scene, bright colors, golden hour glow, dynamic camera move",
        "bridge" => "bridge sequence, dramatic lighting, abstract particles, tension build-up",
        "outro" => "outro shot, KRSTUDIO logo, spotlight, slow fade out",
        _ => "musical performance, cinematic framing, moody lighting",
    }
}
