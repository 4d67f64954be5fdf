// src/watch/clock.rs

use std::fmt::Debug;
use std::time::SystemTime;

/// Source of wall-clock time for the stability check.
///
/// Modification times are wall-clock values, so the comparison has to use
/// `SystemTime` rather than `Instant`.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> SystemTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}
