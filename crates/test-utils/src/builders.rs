#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use stablewatch::config::{ConfigFile, HandlerSection, WatcherSection};
use stablewatch::engine::WatcherOptions;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: ConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: ConfigFile {
                watcher: WatcherSection::default(),
                handler: HandlerSection::default(),
            },
        }
    }

    pub fn watch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.watcher.watch_dir = dir.into();
        self
    }

    pub fn poll_interval(mut self, secs: u64) -> Self {
        self.config.watcher.poll_interval_seconds = secs;
        self
    }

    pub fn stability_window(mut self, secs: u64) -> Self {
        self.config.watcher.stability_window_seconds = secs;
        self
    }

    pub fn cmd(mut self, cmd: &str) -> Self {
        self.config.handler.cmd = Some(cmd.to_string());
        self
    }

    pub fn build(self) -> ConfigFile {
        self.config
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Watcher options with millisecond timings, for fast lifecycle tests.
pub fn fast_options(dir: impl Into<PathBuf>, poll_ms: u64, window_ms: u64) -> WatcherOptions {
    WatcherOptions {
        watch_dir: dir.into(),
        poll_interval: Duration::from_millis(poll_ms),
        stability_window: Duration::from_millis(window_ms),
        forget_missing: false,
    }
}
