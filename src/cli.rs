// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `stablewatch`.
///
/// Every flag that mirrors a config field overrides the config file.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "stablewatch",
    version,
    about = "Watch a directory and hand off each file once it has stopped changing.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Stablewatch.toml` in the current directory if it exists,
    /// otherwise built-in defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory to watch (created if missing).
    #[arg(long, value_name = "DIR")]
    pub watch_dir: Option<PathBuf>,

    /// Seconds between directory scans.
    #[arg(long, value_name = "SECS")]
    pub poll_interval: Option<u64>,

    /// Seconds a file must stay unmodified to count as stable.
    #[arg(long, value_name = "SECS")]
    pub stability_window: Option<u64>,

    /// Forget tracking state for files that disappear.
    #[arg(long)]
    pub forget_missing: bool,

    /// Shell command to run for each stable file (`$STABLEWATCH_PATH`).
    #[arg(long, value_name = "CMD")]
    pub cmd: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STABLEWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Also write logs to a daily-rotated file in this directory.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
