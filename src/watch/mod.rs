// src/watch/mod.rs

//! Poll-based stability detection.
//!
//! This module is responsible for:
//! - Listing the watched directory once per poll tick ([`scanner`]).
//! - Deciding which files have stopped changing ([`tracker`]).
//! - Supplying "now" through a swappable [`clock`].
//!
//! It does **not** know about the work queue or the processing handler; it
//! only turns directory listings into "this path is stable" decisions.

pub mod clock;
pub mod scanner;
pub mod tracker;

pub use clock::{Clock, SystemClock};
pub use scanner::Scanner;
pub use tracker::StabilityTracker;
