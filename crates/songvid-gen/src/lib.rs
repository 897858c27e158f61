//! Client for the video generation backend.
//!
//! The backend is an opaque GPU service that accepts a prompt plus
//! generation parameters over HTTP POST and answers with either raw
//! media bytes or a JSON body carrying a base64-encoded clip. This
//! crate performs exactly one request per clip and persists the result
//! to a caller-specified directory; retry policy, if any, belongs to
//! the caller.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{GenClient, GeneratedClip};
pub use config::GenConfig;
pub use error::{GenError, GenResult};
