//! Song-to-video assembly pipeline.
//!
//! This crate provides:
//! - The shot planner: a pure expansion of a song structure into timed,
//!   prompt-resolved shots
//! - The job orchestrator: planner -> clip generation (serialized by
//!   the admission queue) -> transform stages -> manifest
//! - Pipeline configuration and the worker binary entry point

pub mod config;
pub mod error;
pub mod job;
pub mod planner;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use job::{run_song_job, JobRequest, PipelineContext};
pub use planner::plan_shots;
