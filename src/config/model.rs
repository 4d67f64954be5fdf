// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [watcher]
/// watch_dir = "incoming"
/// poll_interval_seconds = 3
/// stability_window_seconds = 5
///
/// [handler]
/// cmd = "gzip -k \"$STABLEWATCH_PATH\""
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    /// `[watcher]` section.
    #[serde(default)]
    pub watcher: WatcherSection,

    /// `[handler]` section.
    #[serde(default)]
    pub handler: HandlerSection,
}

/// `[watcher]` section: what to watch and how to decide a file is stable.
#[derive(Debug, Clone, Deserialize)]
pub struct WatcherSection {
    /// Directory to watch (non-recursive). Created if missing.
    #[serde(default = "default_watch_dir")]
    pub watch_dir: PathBuf,

    /// Seconds between scans.
    #[serde(default = "default_poll_interval_seconds")]
    pub poll_interval_seconds: u64,

    /// Seconds a file's modification time must stay unchanged.
    ///
    /// Should exceed `poll_interval_seconds` for meaningful debouncing; this
    /// is warned about but not enforced.
    #[serde(default = "default_stability_window_seconds")]
    pub stability_window_seconds: u64,

    /// Drop tracking state for files that disappear from the directory.
    #[serde(default)]
    pub forget_missing: bool,
}

fn default_watch_dir() -> PathBuf {
    PathBuf::from("watch_dir")
}

fn default_poll_interval_seconds() -> u64 {
    3
}

fn default_stability_window_seconds() -> u64 {
    3
}

impl Default for WatcherSection {
    fn default() -> Self {
        Self {
            watch_dir: default_watch_dir(),
            poll_interval_seconds: default_poll_interval_seconds(),
            stability_window_seconds: default_stability_window_seconds(),
            forget_missing: false,
        }
    }
}

impl WatcherSection {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    pub fn stability_window(&self) -> Duration {
        Duration::from_secs(self.stability_window_seconds)
    }
}

/// `[handler]` section: what to do with a stable file.
#[derive(Debug, Clone, Deserialize)]
pub struct HandlerSection {
    /// Shell command run once per stable file. If `None`, files are only
    /// logged.
    #[serde(default)]
    pub cmd: Option<String>,

    /// Simulated processing time for the log-only handler.
    #[serde(default = "default_simulated_seconds")]
    pub simulated_seconds: u64,
}

fn default_simulated_seconds() -> u64 {
    1
}

impl Default for HandlerSection {
    fn default() -> Self {
        Self {
            cmd: None,
            simulated_seconds: default_simulated_seconds(),
        }
    }
}
