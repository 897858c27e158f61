//! Admission queue error types.

use thiserror::Error;

pub type QueueResult<T> = Result<T, QueueError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("Admission queue is closed")]
    Closed,

    #[error("Queue worker dropped the work before completion")]
    WorkerGone,
}
