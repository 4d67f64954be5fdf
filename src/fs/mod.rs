// src/fs/mod.rs

//! Filesystem access behind a trait so the scanner can run against an
//! in-memory tree in tests.

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::errors::{Result, StablewatchError};
use crate::types::FileObservation;

pub mod mock;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    /// List the regular files directly inside `dir` with their modification
    /// times, sorted by path.
    ///
    /// Symlinks, subdirectories and special files are excluded. Failing to
    /// read the directory itself is an error; an entry that disappears
    /// between listing and stat is skipped.
    ///
    /// May block; async callers run it on the blocking pool.
    fn list_files(&self, dir: &Path) -> Result<Vec<FileObservation>>;

    /// Create `dir` (and any missing parents) unless it already exists.
    fn ensure_dir(&self, dir: &Path) -> Result<()>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn list_files(&self, dir: &Path) -> Result<Vec<FileObservation>> {
        let scan_err = |source: io::Error| StablewatchError::Scan {
            dir: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(scan_err)? {
            let entry = entry.map_err(scan_err)?;

            // `DirEntry::file_type` does not follow symlinks.
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(err) => {
                    debug!(path = ?entry.path(), error = %err, "skipping entry without file type");
                    continue;
                }
            };
            if !file_type.is_file() {
                continue;
            }

            match entry.metadata().and_then(|m| m.modified()) {
                Ok(modified) => files.push(FileObservation::new(entry.path(), modified)),
                Err(err) => {
                    debug!(path = ?entry.path(), error = %err, "entry vanished during scan");
                }
            }
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if dir.is_dir() {
            return Ok(());
        }
        if dir.exists() {
            return Err(StablewatchError::Config(format!(
                "watch path {:?} exists but is not a directory",
                dir
            )));
        }
        fs::create_dir_all(dir)?;
        debug!(dir = ?dir, "created watch directory");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_only_regular_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), b"b").unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("inner.txt"), b"x").unwrap();

        #[cfg(unix)]
        std::os::unix::fs::symlink(dir.path().join("a.txt"), dir.path().join("link.txt")).unwrap();

        let files = RealFileSystem.list_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn missing_directory_is_a_scan_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone");

        match RealFileSystem.list_files(&gone) {
            Err(StablewatchError::Scan { dir, .. }) => assert_eq!(dir, gone),
            other => panic!("expected scan error, got {:?}", other),
        }
    }

    #[test]
    fn ensure_dir_creates_missing_and_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a").join("b");

        RealFileSystem.ensure_dir(&target).unwrap();
        assert!(target.is_dir());
        // Idempotent.
        RealFileSystem.ensure_dir(&target).unwrap();

        let file = dir.path().join("plain");
        fs::write(&file, b"").unwrap();
        assert!(matches!(
            RealFileSystem.ensure_dir(&file),
            Err(StablewatchError::Config(_))
        ));
    }
}
