// src/config/validate.rs

use tracing::warn;

use crate::config::model::ConfigFile;
use crate::errors::{Result, StablewatchError};

/// Run semantic validation against a loaded configuration.
///
/// This checks:
/// - `watch_dir` is not empty
/// - `poll_interval_seconds >= 1` and `stability_window_seconds >= 1`
/// - `handler.cmd`, when present, is not blank
///
/// A stability window that does not exceed the poll interval is allowed but
/// logged, since it makes the window check redundant with the tick check.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    let w = &cfg.watcher;

    if w.watch_dir.as_os_str().is_empty() {
        return Err(StablewatchError::Config(
            "[watcher].watch_dir must not be empty".to_string(),
        ));
    }
    if w.poll_interval_seconds == 0 {
        return Err(StablewatchError::Config(
            "[watcher].poll_interval_seconds must be >= 1 (got 0)".to_string(),
        ));
    }
    if w.stability_window_seconds == 0 {
        return Err(StablewatchError::Config(
            "[watcher].stability_window_seconds must be >= 1 (got 0)".to_string(),
        ));
    }
    if let Some(ref cmd) = cfg.handler.cmd {
        if cmd.trim().is_empty() {
            return Err(StablewatchError::Config(
                "[handler].cmd must not be blank".to_string(),
            ));
        }
    }

    if w.stability_window_seconds <= w.poll_interval_seconds {
        warn!(
            poll_interval_seconds = w.poll_interval_seconds,
            stability_window_seconds = w.stability_window_seconds,
            "stability window does not exceed poll interval; files become stable after one unchanged tick"
        );
    }

    Ok(())
}
