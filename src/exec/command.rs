// src/exec/command.rs

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::handler::ProcessHandler;
use crate::errors::Result;
use crate::types::{file_label, ProcessOutcome};

/// Environment variable carrying the stable file's path into the command.
pub const PATH_ENV: &str = "STABLEWATCH_PATH";

/// Runs a shell command for every stable file.
///
/// The path is exported as `STABLEWATCH_PATH` and, on Unix, also passed as
/// `$1`. A non-zero exit status becomes `ProcessOutcome::Failed(code)`;
/// failing to spawn or wait for the process is an error.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    cmd: String,
}

impl CommandHandler {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self { cmd: cmd.into() }
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    async fn run(&self, path: &Path) -> anyhow::Result<ProcessOutcome> {
        let label = file_label(path).into_owned();
        info!(file = %label, cmd = %self.cmd, "starting handler command");

        // Build a shell command appropriate for the platform.
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&self.cmd);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&self.cmd).arg("stablewatch").arg(path);
            c
        };

        cmd.env(PATH_ENV, path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawning handler command for {:?}", path))?;

        // Always consume output so pipe buffers don't fill.
        let stdout = child.stdout.take().map(|s| drain_lines(label.clone(), "stdout", s));
        let stderr = child.stderr.take().map(|s| drain_lines(label.clone(), "stderr", s));

        let status = child
            .wait()
            .await
            .with_context(|| format!("waiting for handler command for {:?}", path))?;

        for reader in [stdout, stderr].into_iter().flatten() {
            let _ = reader.await;
        }

        let code = status.code().unwrap_or(-1);
        info!(file = %label, exit_code = code, success = status.success(), "handler command exited");

        Ok(if status.success() {
            ProcessOutcome::Success
        } else {
            ProcessOutcome::Failed(code)
        })
    }
}

impl ProcessHandler for CommandHandler {
    fn process<'a>(
        &'a self,
        path: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutcome>> + Send + 'a>> {
        Box::pin(async move { Ok(self.run(path).await?) })
    }
}

fn drain_lines<R>(label: String, stream: &'static str, reader: R) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            debug!(file = %label, stream, "{}", line);
        }
    })
}
