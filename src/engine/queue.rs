// src/engine/queue.rs

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use tokio::sync::{watch, Notify};
use tracing::trace;

use crate::errors::{Result, StablewatchError};
use crate::types::QueueItem;

/// Unbounded FIFO between the producer and the consumer, with completion
/// tracking.
///
/// Semantics:
/// - `put` never blocks and never rejects.
/// - `get` waits until an item is available and hands items out strictly in
///   `put` order.
/// - Every `put` increments an "unfinished" counter; the consumer calls
///   `mark_done` once per item it took (whatever the outcome), and `join`
///   resolves once the counter is back to zero.
///
/// Safe to share between one producer and one consumer through an `Arc`.
#[derive(Debug)]
pub struct WorkQueue {
    items: Mutex<VecDeque<QueueItem>>,
    item_ready: Notify,
    /// Items put but not yet marked done.
    unfinished: watch::Sender<usize>,
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkQueue {
    pub fn new() -> Self {
        let (unfinished, _) = watch::channel(0);
        Self {
            items: Mutex::new(VecDeque::new()),
            item_ready: Notify::new(),
            unfinished,
        }
    }

    fn items(&self) -> MutexGuard<'_, VecDeque<QueueItem>> {
        // The deque stays consistent even if a holder panicked.
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Enqueue an item.
    pub fn put(&self, item: QueueItem) {
        // Count first so `join` can never observe zero while the item is queued.
        self.unfinished.send_modify(|n| *n += 1);
        trace!(?item, "queue put");
        self.items().push_back(item);
        self.item_ready.notify_one();
    }

    /// Wait for the next item.
    pub async fn get(&self) -> QueueItem {
        loop {
            let next = self.items().pop_front();
            if let Some(item) = next {
                trace!(?item, "queue get");
                return item;
            }
            self.item_ready.notified().await;
        }
    }

    /// Record that one previously taken item has been fully handled.
    ///
    /// Errors if there is no outstanding item to account for.
    pub fn mark_done(&self) -> Result<()> {
        let mut underflow = false;
        self.unfinished.send_if_modified(|n| {
            if *n == 0 {
                underflow = true;
                false
            } else {
                *n -= 1;
                true
            }
        });

        if underflow {
            return Err(StablewatchError::Queue(
                "mark_done called more times than items were put".to_string(),
            ));
        }
        Ok(())
    }

    /// Wait until every item ever put has been marked done.
    pub async fn join(&self) -> Result<()> {
        let mut rx = self.unfinished.subscribe();
        rx.wait_for(|n| *n == 0)
            .await
            .map(|_| ())
            .map_err(|_| StablewatchError::Queue("completion counter closed".to_string()))
    }

    /// Items waiting to be taken.
    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Items put but not yet marked done (queued plus in flight).
    pub fn unfinished(&self) -> usize {
        *self.unfinished.borrow()
    }
}
