//! Shared data models for the SongVid backend.
//!
//! This crate provides Serde-serializable types for:
//! - Song structures and planned shots
//! - Generation parameters and model selection
//! - Jobs and the per-job output manifest

pub mod generation;
pub mod job;
pub mod manifest;
pub mod shot;
pub mod song;

// Re-export common types
pub use generation::{GenerationParams, ModelKind};
pub use job::JobId;
pub use manifest::{ClipRecord, JobManifest, JobOutputs};
pub use shot::{Shot, ShotPlan};
pub use song::{Section, SongSpec, default_structure, prompt_template};
