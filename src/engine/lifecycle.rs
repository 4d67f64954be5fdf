// src/engine/lifecycle.rs

//! Start/stop orchestration of the producer and consumer tasks.
//!
//! State machine: `Stopped -> Running -> Stopping -> Stopped`.
//!
//! Shutdown order:
//! 1. raise the stop signal,
//! 2. await the producer, which enqueues the sentinel as its final act,
//! 3. await `WorkQueue::join` (all real items and the sentinel marked done),
//!    or the consumer exiting, whichever comes first,
//! 4. await the consumer and collect its stats.
//!
//! `stop` always leaves the watcher `Stopped`, even when it reports an error.
//!
//! There is no timeout on an in-flight handler: a handler that never returns
//! blocks `stop` indefinitely.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::WatcherSection;
use crate::engine::consumer::{Consumer, WatcherStats};
use crate::engine::producer::Producer;
use crate::engine::queue::WorkQueue;
use crate::errors::{Result, StablewatchError};
use crate::exec::ProcessHandler;
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::{QueueItem, WatcherState};
use crate::watch::{Clock, Scanner, StabilityTracker, SystemClock};

/// Runtime knobs for a `DirectoryWatcher`.
#[derive(Debug, Clone)]
pub struct WatcherOptions {
    pub watch_dir: PathBuf,
    pub poll_interval: Duration,
    pub stability_window: Duration,
    /// Forget candidate state for files absent from a scan.
    pub forget_missing: bool,
}

impl From<&WatcherSection> for WatcherOptions {
    fn from(section: &WatcherSection) -> Self {
        Self {
            watch_dir: section.watch_dir.clone(),
            poll_interval: section.poll_interval(),
            stability_window: section.stability_window(),
            forget_missing: section.forget_missing,
        }
    }
}

pub struct DirectoryWatcher {
    options: WatcherOptions,
    fs: Arc<dyn FileSystem>,
    clock: Arc<dyn Clock>,
    handler: Arc<dyn ProcessHandler>,

    state: WatcherState,
    queue: Arc<WorkQueue>,
    /// Kept between runs so a restarted watcher never re-emits a path.
    tracker: Option<StabilityTracker>,
    stop_tx: Option<watch::Sender<bool>>,
    producer: Option<JoinHandle<StabilityTracker>>,
    consumer: Option<JoinHandle<WatcherStats>>,
}

impl std::fmt::Debug for DirectoryWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryWatcher")
            .field("options", &self.options)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl DirectoryWatcher {
    pub fn new(
        options: WatcherOptions,
        fs: Arc<dyn FileSystem>,
        clock: Arc<dyn Clock>,
        handler: Arc<dyn ProcessHandler>,
    ) -> Self {
        Self {
            options,
            fs,
            clock,
            handler,
            state: WatcherState::Stopped,
            queue: Arc::new(WorkQueue::new()),
            tracker: None,
            stop_tx: None,
            producer: None,
            consumer: None,
        }
    }

    /// Watcher over the real filesystem and wall clock.
    pub fn with_real_fs(options: WatcherOptions, handler: Arc<dyn ProcessHandler>) -> Self {
        Self::new(options, Arc::new(RealFileSystem), Arc::new(SystemClock), handler)
    }

    pub fn state(&self) -> WatcherState {
        self.state
    }

    pub fn options(&self) -> &WatcherOptions {
        &self.options
    }

    /// Queue of the current (or last) run.
    pub fn queue(&self) -> &Arc<WorkQueue> {
        &self.queue
    }

    /// Create the watch directory if needed and spawn the producer and
    /// consumer tasks.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self) -> Result<()> {
        if self.state != WatcherState::Stopped {
            return Err(StablewatchError::InvalidState(format!(
                "cannot start a watcher that is {}",
                self.state
            )));
        }

        self.fs.ensure_dir(&self.options.watch_dir)?;

        let queue = Arc::new(WorkQueue::new());
        let (stop_tx, stop_rx) = watch::channel(false);

        let tracker = self.tracker.take().unwrap_or_else(|| {
            StabilityTracker::new(self.options.stability_window)
                .with_forget_missing(self.options.forget_missing)
        });

        let producer = Producer::new(
            Scanner::new(Arc::clone(&self.fs), self.options.watch_dir.clone()),
            tracker,
            Arc::clone(&self.clock),
            Arc::clone(&queue),
            self.options.poll_interval,
            stop_rx,
        );
        let consumer = Consumer::new(Arc::clone(&queue), Arc::clone(&self.handler));

        self.producer = Some(tokio::spawn(producer.run()));
        self.consumer = Some(tokio::spawn(consumer.run()));
        self.stop_tx = Some(stop_tx);
        self.queue = queue;
        self.state = WatcherState::Running;

        info!(
            dir = ?self.options.watch_dir,
            poll_interval = ?self.options.poll_interval,
            stability_window = ?self.options.stability_window,
            "watcher started"
        );
        Ok(())
    }

    /// Stop accepting new files, finish everything already queued, and wait
    /// for both tasks to exit.
    pub async fn stop(&mut self) -> Result<WatcherStats> {
        if self.state != WatcherState::Running {
            return Err(StablewatchError::InvalidState(format!(
                "cannot stop a watcher that is {}",
                self.state
            )));
        }

        self.state = WatcherState::Stopping;
        info!("shutdown requested");

        // Both task handles are consumed on every path through `shut_down`.
        let result = self.shut_down().await;
        self.state = WatcherState::Stopped;

        match &result {
            Ok(stats) => {
                info!(processed = stats.processed, failed = stats.failed, "shutdown complete")
            }
            Err(err) => error!(error = %err, "shutdown did not complete cleanly"),
        }
        result
    }

    async fn shut_down(&mut self) -> Result<WatcherStats> {
        if let Some(stop_tx) = self.stop_tx.take() {
            // Only fails if the producer is already gone.
            let _ = stop_tx.send(true);
        }

        if let Some(producer) = self.producer.take() {
            match producer.await {
                Ok(tracker) => self.tracker = Some(tracker),
                Err(err) => {
                    // The producer never reached its sentinel; supply it so the
                    // consumer still terminates.
                    error!(error = %err, "producer task failed; enqueueing sentinel");
                    self.queue.put(QueueItem::Sentinel);
                }
            }
        }

        let Some(mut consumer) = self.consumer.take() else {
            self.queue.join().await?;
            return Ok(WatcherStats::default());
        };

        // A consumer that dies early would leave `join` waiting forever.
        let exited = tokio::select! {
            drained = self.queue.join() => {
                drained?;
                None
            }
            exited = &mut consumer => Some(exited),
        };
        let exited = match exited {
            Some(exited) => exited,
            None => consumer.await,
        };
        let stats = exited.map_err(|err| {
            StablewatchError::Other(anyhow::anyhow!("consumer task failed: {err}"))
        })?;

        self.queue.join().await?;
        Ok(stats)
    }
}
