//! Error types for the antenna-process crate.

use thiserror::Error;

/// All errors that can abort a command sequence.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The shell could not be spawned (missing shell, bad working directory).
    #[error("Spawn failed for `{command}`: {reason}")]
    Spawn { command: String, reason: String },

    /// The command ran and exited unsuccessfully.
    #[error("Command failed: {command} ({status})\n{stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The command exceeded the service's time limit and was killed.
    #[error("Command timed out after {ms}ms: {command}")]
    Timeout { command: String, ms: u64 },

    /// Waiting on the child or draining its pipes failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, ExecError>;
