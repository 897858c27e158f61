//! FIFO queue with a single consuming worker task.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::error::{QueueError, QueueResult};

/// A pending unit of backend work. The submitter's oneshot responder is
/// captured inside the boxed future, so the worker never sees result
/// types.
struct Entry {
    work: BoxFuture<'static, ()>,
}

/// Serializes all backend-bound work to one in-flight unit.
///
/// Cloning is cheap; all clones feed the same worker. Must be created
/// inside a tokio runtime. There is no cancellation and no timeout:
/// once dequeued, a unit runs to completion or failure.
#[derive(Clone)]
pub struct AdmissionQueue {
    tx: mpsc::UnboundedSender<Entry>,
    pending: Arc<AtomicUsize>,
}

impl AdmissionQueue {
    /// Create the queue and spawn its consumer task.
    pub fn new() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Entry>();
        let pending = Arc::new(AtomicUsize::new(0));

        let worker_pending = Arc::clone(&pending);
        tokio::spawn(async move {
            while let Some(entry) = rx.recv().await {
                worker_pending.fetch_sub(1, Ordering::SeqCst);
                entry.work.await;
            }
            debug!("Admission queue worker stopped");
        });

        Self { tx, pending }
    }

    /// Enqueue a unit of work and wait for its outcome.
    ///
    /// Units are serviced in strict arrival order; a failing unit's
    /// error reaches only its own submitter.
    pub async fn submit<T, F>(&self, work: F) -> QueueResult<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();

        let entry = Entry {
            work: Box::pin(async move {
                // The submitter may have gone away; the work still ran.
                let _ = done_tx.send(work.await);
            }),
        };

        self.pending.fetch_add(1, Ordering::SeqCst);
        if self.tx.send(entry).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            return Err(QueueError::Closed);
        }

        done_rx.await.map_err(|_| QueueError::WorkerGone)
    }

    /// Number of entries waiting to be serviced (excludes the unit
    /// currently in flight).
    pub fn len(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AdmissionQueue {
    fn default() -> Self {
        Self::new()
    }
}
