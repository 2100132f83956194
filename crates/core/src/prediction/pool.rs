//! Bounded pool of scorer processes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Semaphore;

use super::outcome::PredictionError;
use super::subprocess::run_scorer;

/// How to launch the scorer: program, arguments, and optional working directory.
#[derive(Debug, Clone)]
pub struct ScorerCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_directory: Option<PathBuf>,
}

/// Runs at most `max_concurrent` scorer processes at a time.
///
/// Requests beyond the limit are rejected immediately with
/// [`PredictionError::Busy`] rather than queued. Each process is killed if
/// it outlives `timeout`. Cloning shares the same slots.
#[derive(Debug, Clone)]
pub struct ScorerPool {
    command: ScorerCommand,
    slots: Arc<Semaphore>,
    max_concurrent: usize,
    timeout: Duration,
}

impl ScorerPool {
    pub fn new(command: ScorerCommand, max_concurrent: usize, timeout: Duration) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            command,
            slots: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
            timeout,
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Number of scorer processes currently running.
    pub fn in_flight(&self) -> usize {
        self.max_concurrent - self.slots.available_permits()
    }

    /// Score `payload` with a fresh scorer process and return its JSON output.
    pub async fn predict(&self, payload: Value) -> Result<Value, PredictionError> {
        let _permit = self
            .slots
            .clone()
            .try_acquire_owned()
            .map_err(|_| PredictionError::Busy {
                max_concurrent: self.max_concurrent,
            })?;

        let output = run_scorer(&self.command, &payload, self.timeout).await?;
        tracing::debug!(
            exit_code = ?output.exit_code,
            duration_ms = output.duration_ms,
            stdout_len = output.stdout.len(),
            "Scorer finished"
        );
        output.into_result()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
