//! Single-concurrency admission queue.
//!
//! Every call to the generation backend funnels through one
//! [`AdmissionQueue`], which guarantees at most one unit of
//! backend-bound work is in flight at any time, serviced in strict
//! arrival order. A dedicated consumer task drains an mpsc channel;
//! results travel back to each submitter over a oneshot.

pub mod error;
pub mod queue;

pub use error::{QueueError, QueueResult};
pub use queue::AdmissionQueue;
