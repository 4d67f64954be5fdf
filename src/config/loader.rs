// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::ConfigFile;
use crate::config::validate::validate_config;
use crate::errors::{Result, StablewatchError};

/// Load a configuration file from a given path and return the raw `ConfigFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for
/// semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        StablewatchError::Config(format!("reading config file at {:?}: {}", path, e))
    })?;

    let config: ConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a configuration file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let config = load_from_path(&path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Config file picked up when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Stablewatch.toml")
}

/// Load `path` if given; otherwise the default config file if it exists;
/// otherwise built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = path {
        return load_from_path(path);
    }

    let default_path = default_config_path();
    if default_path.is_file() {
        debug!(path = ?default_path, "using default config file");
        return load_from_path(default_path);
    }

    debug!("no config file; using built-in defaults");
    Ok(ConfigFile::default())
}

/// Apply command-line overrides on top of a loaded config.
pub fn apply_cli_overrides(cfg: &mut ConfigFile, args: &CliArgs) {
    if let Some(ref dir) = args.watch_dir {
        cfg.watcher.watch_dir = dir.clone();
    }
    if let Some(secs) = args.poll_interval {
        cfg.watcher.poll_interval_seconds = secs;
    }
    if let Some(secs) = args.stability_window {
        cfg.watcher.stability_window_seconds = secs;
    }
    if args.forget_missing {
        cfg.watcher.forget_missing = true;
    }
    if let Some(ref cmd) = args.cmd {
        cfg.handler.cmd = Some(cmd.clone());
    }
}

/// Full resolution used by the binary: load, override, validate.
pub fn load_effective(args: &CliArgs) -> Result<ConfigFile> {
    let mut cfg = load_or_default(args.config.as_deref())?;
    apply_cli_overrides(&mut cfg, args);
    validate_config(&cfg)?;
    Ok(cfg)
}
