// src/exec/handler.rs

//! Pluggable processing handler abstraction.
//!
//! The consumer talks to a `ProcessHandler` instead of running anything
//! itself. Production uses [`super::CommandHandler`] or
//! [`super::LogOnlyHandler`]; tests plug in recording or failing fakes.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use crate::errors::Result;
use crate::types::ProcessOutcome;

/// Processes one stable file.
///
/// Called at most once per path, one file at a time. Errors (and panics)
/// are contained by the consumer: they are logged and the file is still
/// marked done. Retrying is the handler's own business.
pub trait ProcessHandler: Send + Sync {
    fn process<'a>(
        &'a self,
        path: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutcome>> + Send + 'a>>;
}
