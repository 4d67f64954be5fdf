// src/engine/producer.rs

//! Scan/detect/emit loop.
//!
//! The producer is the only writer of the work queue and the only place the
//! sentinel comes from. Once it observes the stop signal it stops emitting,
//! enqueues the sentinel as its last act, and exits. Because nothing can be
//! put after the sentinel, the consumer always drains every real item before
//! terminating and `WorkQueue::join` cannot hang on orphaned work.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::engine::queue::WorkQueue;
use crate::errors::{Result, StablewatchError};
use crate::types::{file_label, FileObservation, QueueItem};
use crate::watch::{Clock, Scanner, StabilityTracker};

#[derive(Debug)]
pub struct Producer {
    scanner: Scanner,
    tracker: StabilityTracker,
    clock: Arc<dyn Clock>,
    queue: Arc<WorkQueue>,
    poll_interval: Duration,
    stop_rx: watch::Receiver<bool>,
}

impl Producer {
    pub fn new(
        scanner: Scanner,
        tracker: StabilityTracker,
        clock: Arc<dyn Clock>,
        queue: Arc<WorkQueue>,
        poll_interval: Duration,
        stop_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            scanner,
            tracker,
            clock,
            queue,
            poll_interval,
            stop_rx,
        }
    }

    /// Run until the stop signal is observed, then enqueue the sentinel.
    ///
    /// The stop signal is checked once per iteration (after the sleep,
    /// before the next scan) and again before every individual `put`.
    ///
    /// Returns the tracker so a restarted watcher keeps its seen-set.
    pub async fn run(mut self) -> StabilityTracker {
        info!(dir = ?self.scanner.dir(), "producer started");

        while !self.stop_requested() {
            self.tick().await;
            tokio::time::sleep(self.poll_interval).await;
        }

        self.queue.put(QueueItem::Sentinel);
        info!("producer finished; sentinel enqueued");
        self.tracker
    }

    /// One scan + detect + emit pass. Returns the number of paths enqueued.
    ///
    /// Stable paths that are not enqueued because stop arrived mid-tick are
    /// handed back to the tracker, so a later run still reports them.
    pub async fn tick(&mut self) -> usize {
        let scan = match self.scan().await {
            Ok(scan) => scan,
            Err(err) => {
                warn!(error = %err, "scan failed; retrying on next tick");
                return 0;
            }
        };

        let stable = self.tracker.observe(&scan, self.clock.now());
        let mut enqueued = 0;
        let mut stable = stable.into_iter();

        while let Some(path) = stable.next() {
            if self.stop_requested() {
                let mut dropped = 0;
                for path in std::iter::once(path).chain(stable.by_ref()) {
                    self.tracker.unmark(&path);
                    dropped += 1;
                }
                debug!(dropped, "shutdown requested; not enqueueing remaining stable files");
                break;
            }
            info!(file = %file_label(&path), "file stable");
            self.queue.put(QueueItem::File(path));
            enqueued += 1;
        }

        enqueued
    }

    /// List the directory on the blocking pool.
    async fn scan(&self) -> Result<Vec<FileObservation>> {
        let scanner = self.scanner.clone();
        match tokio::task::spawn_blocking(move || scanner.scan()).await {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => Err(StablewatchError::Other(anyhow::anyhow!("scan task failed: {err}"))),
        }
    }

    fn stop_requested(&self) -> bool {
        // A dropped sender means the owning watcher is gone.
        *self.stop_rx.borrow() || self.stop_rx.has_changed().is_err()
    }
}
