//! Scorer process results and how they map to a prediction outcome.

use serde_json::Value;

/// Everything captured from a scorer process that ran to completion.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, or `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
}

/// Ways a prediction request can fail.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    /// Every scorer slot is taken; no process was started.
    #[error("All {max_concurrent} scorer slots are busy")]
    Busy { max_concurrent: usize },

    /// The scorer process could not be launched.
    #[error("Failed to start scorer process: {0}")]
    FailedToStart(#[source] std::io::Error),

    /// The scorer exited with a non-zero status (`-1` when killed by a signal).
    #[error("Scorer exited with code {exit_code}")]
    NonZeroExit { exit_code: i32, stderr: String },

    /// The scorer exited cleanly but stdout was not JSON.
    #[error("Scorer produced invalid JSON: {reason}")]
    InvalidOutput { stdout: String, reason: String },

    /// The scorer exceeded its time budget and was killed.
    #[error("Scorer timed out after {elapsed_ms}ms")]
    TimedOut { elapsed_ms: u64 },

    /// Waiting on the running process failed.
    #[error("I/O error while waiting for scorer: {0}")]
    Io(#[source] std::io::Error),
}

impl ProcessOutput {
    /// Classify a finished process.
    ///
    /// Non-zero exit wins over output parsing. Empty stdout is treated as
    /// an empty result array.
    pub fn into_result(self) -> Result<Value, PredictionError> {
        match self.exit_code {
            Some(0) => {}
            code => {
                return Err(PredictionError::NonZeroExit {
                    exit_code: code.unwrap_or(-1),
                    stderr: self.stderr,
                })
            }
        }

        let trimmed = self.stdout.trim();
        if trimmed.is_empty() {
            return Ok(Value::Array(Vec::new()));
        }

        serde_json::from_str(trimmed).map_err(|e| PredictionError::InvalidOutput {
            reason: e.to_string(),
            stdout: self.stdout,
        })
    }
}
