use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use stablewatch::build_handler;
use stablewatch::cli::CliArgs;
use stablewatch::config::{load_and_validate, load_effective, load_from_path, validate_config};
use stablewatch::errors::StablewatchError;
use stablewatch_test_utils::builders::ConfigFileBuilder;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn empty_file_uses_defaults() {
    let file = config_file("");
    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.watcher.watch_dir, PathBuf::from("watch_dir"));
    assert_eq!(cfg.watcher.poll_interval_seconds, 3);
    assert_eq!(cfg.watcher.stability_window_seconds, 3);
    assert!(!cfg.watcher.forget_missing);
    assert_eq!(cfg.handler.cmd, None);
    assert_eq!(cfg.handler.simulated_seconds, 1);
}

#[test]
fn full_file_is_parsed() {
    let file = config_file(
        r#"
[watcher]
watch_dir = "/srv/incoming"
poll_interval_seconds = 2
stability_window_seconds = 10
forget_missing = true

[handler]
cmd = "echo $STABLEWATCH_PATH"
"#,
    );
    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.watcher.watch_dir, PathBuf::from("/srv/incoming"));
    assert_eq!(cfg.watcher.poll_interval().as_secs(), 2);
    assert_eq!(cfg.watcher.stability_window().as_secs(), 10);
    assert!(cfg.watcher.forget_missing);
    assert_eq!(cfg.handler.cmd.as_deref(), Some("echo $STABLEWATCH_PATH"));
}

#[test]
fn zero_interval_is_a_config_error() {
    let file = config_file("[watcher]\npoll_interval_seconds = 0\n");

    match load_and_validate(file.path()) {
        Err(StablewatchError::Config(msg)) => assert!(msg.contains("poll_interval_seconds")),
        other => panic!("expected Config error, got {:?}", other),
    }
}

#[test]
fn negative_interval_fails_to_parse() {
    let file = config_file("[watcher]\nstability_window_seconds = -1\n");
    assert!(matches!(
        load_from_path(file.path()),
        Err(StablewatchError::Toml(_))
    ));
}

#[test]
fn window_not_exceeding_poll_is_allowed() {
    let cfg = ConfigFileBuilder::new()
        .poll_interval(5)
        .stability_window(2)
        .build();
    assert!(validate_config(&cfg).is_ok());
}

#[test]
fn blank_command_is_rejected() {
    let cfg = ConfigFileBuilder::new().cmd("   ").build();
    assert!(matches!(
        validate_config(&cfg),
        Err(StablewatchError::Config(_))
    ));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let args = CliArgs {
        config: Some(PathBuf::from("/definitely/not/here.toml")),
        ..CliArgs::default()
    };
    assert!(matches!(
        load_effective(&args),
        Err(StablewatchError::Config(_))
    ));
}

#[test]
fn cli_flags_override_file_values() {
    let file = config_file(
        r#"
[watcher]
watch_dir = "from-file"
poll_interval_seconds = 2
stability_window_seconds = 4
"#,
    );
    let args = CliArgs {
        config: Some(file.path().to_path_buf()),
        watch_dir: Some(PathBuf::from("from-cli")),
        stability_window: Some(9),
        forget_missing: true,
        cmd: Some("true".to_string()),
        ..CliArgs::default()
    };

    let cfg = load_effective(&args).unwrap();
    assert_eq!(cfg.watcher.watch_dir, PathBuf::from("from-cli"));
    assert_eq!(cfg.watcher.poll_interval_seconds, 2);
    assert_eq!(cfg.watcher.stability_window_seconds, 9);
    assert!(cfg.watcher.forget_missing);
    assert_eq!(cfg.handler.cmd.as_deref(), Some("true"));

    // Command configured -> command handler; it is usable as a trait object.
    let _handler = build_handler(&cfg.handler);
}

#[test]
fn cli_override_is_validated() {
    let file = config_file("");
    let args = CliArgs {
        config: Some(file.path().to_path_buf()),
        poll_interval: Some(0),
        ..CliArgs::default()
    };
    assert!(matches!(
        load_effective(&args),
        Err(StablewatchError::Config(_))
    ));
}
