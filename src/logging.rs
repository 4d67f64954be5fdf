// src/logging.rs

//! Logging setup for `stablewatch` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `STABLEWATCH_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs always go to STDERR. With `--log-dir`, a second layer writes plain
//! (non-ANSI) lines to a daily-rotated `stablewatch.*.log`, keeping the five
//! most recent files.
//!
//! Only the binary calls this; library code just emits events, so tests are
//! free to install their own subscriber.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, registry};

use crate::cli::LogLevel;

const LOG_FILE_PREFIX: &str = "stablewatch";
const MAX_LOG_FILES: usize = 5;

/// Initialise the global logging subscriber.
///
/// Safe to call once at startup. When file logging is enabled the returned
/// guard must be kept alive until exit so buffered lines get flushed.
pub fn init_logging(cli_level: Option<LogLevel>, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => std::env::var("STABLEWATCH_LOG")
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(tracing::Level::INFO),
    };

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr);

    let Some(dir) = log_dir else {
        registry()
            .with(LevelFilter::from_level(level))
            .with(stderr_layer)
            .try_init()
            .context("installing tracing subscriber")?;
        return Ok(None);
    };

    std::fs::create_dir_all(dir).with_context(|| format!("creating log directory {:?}", dir))?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(dir)
        .with_context(|| format!("creating rolling log file in {:?}", dir))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    registry()
        .with(LevelFilter::from_level(level))
        .with(stderr_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(Some(guard))
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
