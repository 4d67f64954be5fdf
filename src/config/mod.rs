// src/config/mod.rs

//! Configuration loading and validation for stablewatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk and merge CLI overrides (`loader.rs`).
//! - Validate basic invariants like positive intervals (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{apply_cli_overrides, load_and_validate, load_effective, load_from_path, load_or_default};
pub use model::{ConfigFile, HandlerSection, WatcherSection};
pub use validate::validate_config;
