//! Spawn a scorer process, feed it the payload, and collect its output.

use std::process::Stdio;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{ChildStdin, Command};

use super::outcome::{PredictionError, ProcessOutput};
use super::pool::ScorerCommand;

/// Maximum stdout or stderr captured per stream (10 MiB).
const MAX_OUTPUT_BYTES: u64 = 10 * 1024 * 1024;

/// Run `command` once with `payload` on stdin and wait up to `timeout`.
///
/// The output readers start before the payload is written, and the write,
/// the wait and the output collection all count against `timeout`. stdin is
/// closed once the payload is written so the scorer sees end-of-input. On
/// timeout the child is killed.
pub async fn run_scorer(
    command: &ScorerCommand,
    payload: &Value,
    timeout: Duration,
) -> Result<ProcessOutput, PredictionError> {
    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if let Some(dir) = &command.working_directory {
        cmd.current_dir(dir);
    }

    let start = Instant::now();
    let mut child = cmd.spawn().map_err(PredictionError::FailedToStart)?;

    let mut stdout_task = tokio::spawn(read_stream(child.stdout.take()));
    let mut stderr_task = tokio::spawn(read_stream(child.stderr.take()));
    let stdin_task = child
        .stdin
        .take()
        .map(|stdin| tokio::spawn(write_payload(stdin, payload.to_string().into_bytes())));

    let outcome = tokio::time::timeout(timeout, async {
        let status = child.wait().await?;
        let stdout = (&mut stdout_task).await.unwrap_or_default();
        let stderr = (&mut stderr_task).await.unwrap_or_default();
        Ok::<_, std::io::Error>((status, stdout, stderr))
    })
    .await;

    // Unread input is of no use once the scorer has exited or been killed.
    if let Some(task) = stdin_task {
        task.abort();
    }

    match outcome {
        Ok(Ok((status, stdout, stderr))) => Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
            exit_code: status.code(),
            duration_ms: start.elapsed().as_millis() as u64,
        }),
        Ok(Err(e)) => {
            stdout_task.abort();
            stderr_task.abort();
            Err(PredictionError::Io(e))
        }
        Err(_elapsed) => {
            if let Err(e) = child.start_kill() {
                tracing::warn!(error = %e, "Failed to kill timed-out scorer");
            }
            stdout_task.abort();
            stderr_task.abort();
            Err(PredictionError::TimedOut {
                elapsed_ms: start.elapsed().as_millis() as u64,
            })
        }
    }
}

async fn write_payload(mut stdin: ChildStdin, bytes: Vec<u8>) {
    // A scorer that exits without reading stdin closes the pipe; that is
    // reported through its exit status, not here.
    if let Err(e) = stdin.write_all(&bytes).await {
        tracing::debug!(error = %e, "Scorer closed stdin early");
    }
}

async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(h) = handle {
        let _ = h.take(MAX_OUTPUT_BYTES).read_to_end(&mut buf).await;
    }
    buf
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
