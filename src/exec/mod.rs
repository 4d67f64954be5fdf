// src/exec/mod.rs

//! Processing layer.
//!
//! - [`handler`] defines the `ProcessHandler` trait the consumer calls for
//!   every stable file.
//! - [`command`] runs a configured shell command per file using
//!   `tokio::process::Command`.
//! - [`log_only`] is the fallback when no command is configured: it logs the
//!   file and simulates work.

pub mod command;
pub mod handler;
pub mod log_only;

pub use command::CommandHandler;
pub use handler::ProcessHandler;
pub use log_only::LogOnlyHandler;
