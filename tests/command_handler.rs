#![cfg(unix)]

use std::path::Path;

use stablewatch::exec::{CommandHandler, LogOnlyHandler, ProcessHandler};
use stablewatch::types::ProcessOutcome;
use stablewatch_test_utils::{init_tracing, with_timeout};

#[tokio::test]
async fn path_is_passed_as_env_and_argument() {
    init_tracing();
    let handler = CommandHandler::new(r#"test "$1" = "$STABLEWATCH_PATH" && test "$1" = "/tmp/in/a b.txt""#);

    let outcome = with_timeout(handler.process(Path::new("/tmp/in/a b.txt")))
        .await
        .unwrap();
    assert_eq!(outcome, ProcessOutcome::Success);
}

#[tokio::test]
async fn non_zero_exit_is_a_failed_outcome() {
    init_tracing();
    let handler = CommandHandler::new("echo working; echo oops >&2; exit 3");

    let outcome = with_timeout(handler.process(Path::new("f")))
        .await
        .unwrap();
    assert_eq!(outcome, ProcessOutcome::Failed(3));
}

#[tokio::test]
async fn output_written_by_the_command_is_visible() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("seen.txt");
    let handler = CommandHandler::new(format!(r#"basename "$1" > "{}""#, out.display()));

    let outcome = with_timeout(handler.process(&dir.path().join("data.csv")))
        .await
        .unwrap();
    assert_eq!(outcome, ProcessOutcome::Success);
    assert_eq!(std::fs::read_to_string(out).unwrap().trim(), "data.csv");
}

#[tokio::test]
async fn log_only_handler_always_succeeds() {
    let handler = LogOnlyHandler::new(std::time::Duration::ZERO);
    let outcome = handler.process(Path::new("x")).await.unwrap();
    assert_eq!(outcome, ProcessOutcome::Success);
}
