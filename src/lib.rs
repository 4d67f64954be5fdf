// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, error};

use crate::cli::CliArgs;
use crate::config::{load_effective, ConfigFile, HandlerSection};
use crate::engine::{DirectoryWatcher, WatcherOptions};
use crate::exec::{CommandHandler, LogOnlyHandler, ProcessHandler};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI overrides)
/// - the processing handler
/// - the directory watcher
/// - Ctrl-C handling (translated into a graceful `stop`)
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_effective(&args)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let handler = build_handler(&cfg.handler);
    let mut watcher = DirectoryWatcher::with_real_fs(WatcherOptions::from(&cfg.watcher), handler);
    watcher.start()?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl+C; shutting down");
    }

    watcher.stop().await?;
    Ok(())
}

/// Pick the handler described by the `[handler]` section.
pub fn build_handler(section: &HandlerSection) -> Arc<dyn ProcessHandler> {
    match section.cmd {
        Some(ref cmd) => Arc::new(CommandHandler::new(cmd.clone())),
        None => Arc::new(LogOnlyHandler::new(Duration::from_secs(section.simulated_seconds))),
    }
}

/// Simple dry-run output: print the effective configuration.
fn print_dry_run(cfg: &ConfigFile) {
    println!("stablewatch dry-run");
    println!("  watcher.watch_dir = {}", cfg.watcher.watch_dir.display());
    println!(
        "  watcher.poll_interval_seconds = {}",
        cfg.watcher.poll_interval_seconds
    );
    println!(
        "  watcher.stability_window_seconds = {}",
        cfg.watcher.stability_window_seconds
    );
    println!("  watcher.forget_missing = {}", cfg.watcher.forget_missing);
    println!();

    match cfg.handler.cmd {
        Some(ref cmd) => println!("handler: command `{cmd}`"),
        None => println!(
            "handler: log only ({}s simulated processing)",
            cfg.handler.simulated_seconds
        ),
    }

    debug!("dry-run complete (no watching)");
}
