// src/engine/consumer.rs

//! Dequeue/process loop.
//!
//! Files are processed one at a time in queue order. Every item taken from
//! the queue is marked done exactly once, including the sentinel and
//! including items whose handler failed or panicked, so `WorkQueue::join`
//! always reflects real progress.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::engine::queue::WorkQueue;
use crate::exec::ProcessHandler;
use crate::types::{file_label, ProcessOutcome, QueueItem};

/// Counts reported when the consumer exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatcherStats {
    pub processed: usize,
    pub failed: usize,
}

pub struct Consumer {
    queue: Arc<WorkQueue>,
    handler: Arc<dyn ProcessHandler>,
}

impl std::fmt::Debug for Consumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Consumer")
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}

/// Marks one queue item done when dropped.
struct DoneGuard<'a> {
    queue: &'a WorkQueue,
}

impl Drop for DoneGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.queue.mark_done() {
            error!(error = %err, "failed to mark queue item done");
        }
    }
}

impl Consumer {
    pub fn new(queue: Arc<WorkQueue>, handler: Arc<dyn ProcessHandler>) -> Self {
        Self { queue, handler }
    }

    /// Process items until the sentinel arrives.
    pub async fn run(self) -> WatcherStats {
        info!("consumer started");
        let mut stats = WatcherStats::default();

        loop {
            let item = self.queue.get().await;
            let _done = DoneGuard { queue: &self.queue };

            match item {
                QueueItem::Sentinel => {
                    info!("sentinel received by consumer");
                    break;
                }
                QueueItem::File(path) => {
                    if self.process(path).await {
                        stats.processed += 1;
                    } else {
                        stats.failed += 1;
                    }
                }
            }
        }

        info!(processed = stats.processed, failed = stats.failed, "consumer finished");
        stats
    }

    /// Run the handler for one file. Returns true on success.
    ///
    /// The handler runs in its own task so a panic surfaces as a join error
    /// here instead of killing the consumer loop.
    async fn process(&self, path: PathBuf) -> bool {
        let handler = Arc::clone(&self.handler);
        let task_path = path.clone();
        let joined = tokio::spawn(async move { handler.process(&task_path).await }).await;

        let label = file_label(&path);
        match joined {
            Ok(Ok(ProcessOutcome::Success)) => {
                info!(file = %label, "file processed");
                true
            }
            Ok(Ok(ProcessOutcome::Failed(code))) => {
                warn!(file = %label, code, "handler reported failure");
                false
            }
            Ok(Err(err)) => {
                error!(file = %label, error = %err, "handler error");
                false
            }
            Err(err) => {
                error!(file = %label, error = %err, "handler task panicked or was cancelled");
                false
            }
        }
    }
}
