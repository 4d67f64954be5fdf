use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use stablewatch::errors::{Result, StablewatchError};
use stablewatch::exec::ProcessHandler;
use stablewatch::types::ProcessOutcome;

/// A fake handler that:
/// - records which files were "processed", in order
/// - optionally takes some time per file
/// - always reports success.
#[derive(Debug, Clone, Default)]
pub struct RecordingHandler {
    processed: Arc<Mutex<Vec<PathBuf>>>,
    delay: Duration,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            processed: Arc::default(),
            delay,
        }
    }

    pub fn processed(&self) -> Vec<PathBuf> {
        self.processed.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.processed.lock().unwrap().len()
    }
}

impl ProcessHandler for RecordingHandler {
    fn process<'a>(
        &'a self,
        path: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutcome>> + Send + 'a>> {
        Box::pin(async move {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.processed.lock().unwrap().push(path.to_path_buf());
            Ok(ProcessOutcome::Success)
        })
    }
}

/// How a [`FailingHandler`] fails.
#[derive(Debug, Clone, Copy)]
pub enum FailureMode {
    /// Return `Err(..)`.
    Error,
    /// Return `Ok(ProcessOutcome::Failed(code))`.
    Outcome(i32),
    /// Panic inside the handler.
    Panic,
}

/// A fake handler that fails on every call, after recording the path.
#[derive(Debug, Clone)]
pub struct FailingHandler {
    mode: FailureMode,
    calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl FailingHandler {
    pub fn new(mode: FailureMode) -> Self {
        Self {
            mode,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProcessHandler for FailingHandler {
    fn process<'a>(
        &'a self,
        path: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutcome>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(path.to_path_buf());
            match self.mode {
                FailureMode::Error => Err(StablewatchError::Other(anyhow::anyhow!(
                    "simulated failure for {:?}",
                    path
                ))),
                FailureMode::Outcome(code) => Ok(ProcessOutcome::Failed(code)),
                FailureMode::Panic => panic!("simulated handler panic for {:?}", path),
            }
        })
    }
}
