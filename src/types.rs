use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One regular file as seen by a single scan pass.
///
/// Produced fresh on every poll tick and dropped once the tracker has
/// consumed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileObservation {
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl FileObservation {
    pub fn new(path: impl Into<PathBuf>, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            modified,
        }
    }
}

/// Item carried by the work queue.
///
/// The sentinel is its own variant so no real path can ever be mistaken
/// for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueItem {
    File(PathBuf),
    Sentinel,
}

impl QueueItem {
    pub fn is_sentinel(&self) -> bool {
        matches!(self, QueueItem::Sentinel)
    }
}

/// Result reported by a processing handler for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    Success,
    Failed(i32),
}

/// Lifecycle state of a `DirectoryWatcher`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatcherState {
    #[default]
    Stopped,
    Running,
    Stopping,
}

impl fmt::Display for WatcherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WatcherState::Stopped => "stopped",
            WatcherState::Running => "running",
            WatcherState::Stopping => "stopping",
        };
        f.write_str(s)
    }
}

/// Short label for a path in log lines: the file name when there is one.
pub fn file_label(path: &Path) -> Cow<'_, str> {
    match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => path.to_string_lossy(),
    }
}
