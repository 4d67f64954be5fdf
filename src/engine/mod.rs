// src/engine/mod.rs

//! Producer/consumer engine.
//!
//! This module ties together:
//! - the work queue handing stable paths from the scanner to the worker
//! - the producer loop (scan, detect, emit, sleep)
//! - the consumer loop (dequeue, process, mark done)
//! - the lifecycle controller that starts both and shuts them down in order
//!
//! The producer and consumer share nothing but the [`WorkQueue`]; tracker
//! state is owned by the producer alone.

pub mod consumer;
pub mod lifecycle;
pub mod producer;
pub mod queue;

pub use consumer::{Consumer, WatcherStats};
pub use lifecycle::{DirectoryWatcher, WatcherOptions};
pub use producer::Producer;
pub use queue::WorkQueue;
