//! Planned shots.

use serde::{Deserialize, Serialize};

/// A single planned unit of generation.
///
/// Created once by the shot planner and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// Ordinal id within the plan (1-based)
    pub id: u32,

    /// Human-readable label (song-section name)
    pub label: String,

    /// Fully resolved prompt text
    pub prompt: String,

    /// Planned duration in seconds
    pub duration_sec: f64,

    /// Planned start offset in seconds (cumulative)
    pub start_sec: f64,

    /// Lyrics block assigned to this shot, if lyrics were supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyrics_excerpt: Option<String>,

    /// Which repetition of the structure this instance belongs to (1-based)
    pub loop_index: u32,
}

/// Ordered shot list plus the total planned duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotPlan {
    /// Shots in strictly increasing `start_sec` order
    pub shots: Vec<Shot>,

    /// Sum of `duration_sec` over `shots`
    pub planned_duration_sec: f64,
}

impl ShotPlan {
    /// Number of planned shots.
    pub fn len(&self) -> usize {
        self.shots.len()
    }

    /// Whether the plan contains no shots.
    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }
}
