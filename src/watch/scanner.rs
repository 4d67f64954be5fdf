// src/watch/scanner.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::trace;

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::types::FileObservation;

/// Lists the regular files of a single directory.
///
/// One call to [`Scanner::scan`] is one blocking listing; the caller decides
/// what to do with a failure (the producer logs it and retries next tick).
#[derive(Debug, Clone)]
pub struct Scanner {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
}

impl Scanner {
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn scan(&self) -> Result<Vec<FileObservation>> {
        let files = self.fs.list_files(&self.dir)?;
        trace!(dir = ?self.dir, files = files.len(), "scanned directory");
        Ok(files)
    }
}
