//! Shared data types for antenna-process.

use tracing::{error, info};

use crate::error::ExecError;

/// Everything one command produced: both streams in full plus the reason it
/// failed, if it did. The three are independent: a successful command may
/// still write to stderr, and a failed one may have produced stdout.
#[derive(Debug)]
pub struct ProcessOutput {
    /// Captured standard output, unmodified.
    pub stdout: String,

    /// Captured standard error, unmodified.
    pub stderr: String,

    /// Set on non-zero exit, signal, spawn failure or timeout.
    pub failure: Option<ExecError>,
}

impl ProcessOutput {
    /// A command that never produced output because it could not run.
    pub(crate) fn failed(error: ExecError) -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            failure: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Emit the captured streams as individual log lines.
    ///
    /// stderr goes out at error level, stdout at info level, one event per
    /// line. A failure's message is logged line by line as well.
    pub fn log(&self) {
        for line in non_empty_lines(&self.stderr) {
            error!("stderr: {line}");
        }
        for line in non_empty_lines(&self.stdout) {
            info!("stdout: {line}");
        }
        if self.stdout.trim().is_empty() && self.stderr.trim().is_empty() && self.is_success() {
            info!("No output");
        }
        if let Some(ref failure) = self.failure {
            for line in failure.to_string().trim().lines() {
                error!("error: {line}");
            }
        }
    }
}

/// Strip ANSI escapes for log output and split into trimmed, non-empty lines.
fn non_empty_lines(raw: &str) -> Vec<String> {
    let clean = strip_ansi_escapes::strip_str(raw);
    clean
        .trim()
        .lines()
        .map(str::to_string)
        .filter(|l| !l.trim().is_empty())
        .collect()
}
