// src/fs/mock.rs

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::SystemTime;

use super::FileSystem;
use crate::errors::{Result, StablewatchError};
use crate::types::FileObservation;

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(SystemTime),
    Symlink(PathBuf),
    Dir,
}

/// In-memory filesystem with explicit modification times.
///
/// Cloning shares the same tree, so a test can keep a handle and mutate
/// files while a watcher scans them.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<BTreeMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, MockEntry>> {
        // A panicking test thread must not wedge every other user of the mock.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut entries = self.lock();
        let mut current = Some(path.as_ref());
        while let Some(p) = current {
            if p.as_os_str().is_empty() {
                break;
            }
            entries.insert(p.to_path_buf(), MockEntry::Dir);
            current = p.parent();
        }
    }

    /// Create or overwrite a file, creating its parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, modified: SystemTime) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.lock()
            .insert(path.to_path_buf(), MockEntry::File(modified));
    }

    /// Update a file's modification time (same as rewriting it).
    pub fn touch(&self, path: impl AsRef<Path>, modified: SystemTime) {
        self.add_file(path, modified);
    }

    pub fn add_symlink(&self, path: impl AsRef<Path>, target: impl Into<PathBuf>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.lock()
            .insert(path.to_path_buf(), MockEntry::Symlink(target.into()));
    }

    pub fn remove_file(&self, path: impl AsRef<Path>) {
        self.lock().remove(path.as_ref());
    }

    /// Remove a directory and everything below it.
    pub fn remove_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.lock().retain(|p, _| !p.starts_with(path));
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        matches!(self.lock().get(path.as_ref()), Some(MockEntry::Dir))
    }
}

impl FileSystem for MockFileSystem {
    fn list_files(&self, dir: &Path) -> Result<Vec<FileObservation>> {
        let entries = self.lock();
        match entries.get(dir) {
            Some(MockEntry::Dir) => {}
            _ => {
                return Err(StablewatchError::Scan {
                    dir: dir.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::NotFound, "not a directory or not found"),
                });
            }
        }

        // BTreeMap iteration is already sorted by path.
        Ok(entries
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .filter_map(|(path, entry)| match entry {
                MockEntry::File(modified) => Some(FileObservation::new(path.clone(), *modified)),
                _ => None,
            })
            .collect())
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        match self.lock().get(dir) {
            Some(MockEntry::Dir) => return Ok(()),
            Some(_) => {
                return Err(StablewatchError::Config(format!(
                    "watch path {:?} exists but is not a directory",
                    dir
                )));
            }
            None => {}
        }
        self.add_dir(dir);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn lists_direct_regular_children_only() {
        let fs = MockFileSystem::new();
        let t = UNIX_EPOCH + Duration::from_secs(10);
        fs.add_file("/w/b", t);
        fs.add_file("/w/a", t);
        fs.add_file("/w/sub/c", t);
        fs.add_symlink("/w/link", "/w/a");

        let files = fs.list_files(Path::new("/w")).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("/w/a"), PathBuf::from("/w/b")]);
    }

    #[test]
    fn removed_dir_fails_to_list() {
        let fs = MockFileSystem::new();
        fs.add_dir("/w");
        fs.remove_dir("/w");
        assert!(matches!(
            fs.list_files(Path::new("/w")),
            Err(StablewatchError::Scan { .. })
        ));
    }
}
