// src/exec/log_only.rs

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::time::Duration;

use tracing::info;

use super::handler::ProcessHandler;
use crate::errors::Result;
use crate::types::{file_label, ProcessOutcome};

/// Placeholder handler: logs the file and simulates work by sleeping.
///
/// Used when no `cmd` is configured.
#[derive(Debug, Clone)]
pub struct LogOnlyHandler {
    delay: Duration,
}

impl LogOnlyHandler {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for LogOnlyHandler {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl ProcessHandler for LogOnlyHandler {
    fn process<'a>(
        &'a self,
        path: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutcome>> + Send + 'a>> {
        Box::pin(async move {
            info!(file = %file_label(path), "processing file");
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(ProcessOutcome::Success)
        })
    }
}
