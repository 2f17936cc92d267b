//! `ProcessRunner`, the production [`CommandRunner`].
//!
//! Commands are spawned with `tokio::process::Command` so a slow deploy
//! script never blocks the runtime, and a per-service timeout can race the
//! child. Children are created with `kill_on_drop`, which is how a timed-out
//! command gets terminated.

use std::process::Stdio;
use std::time::Duration;

use antenna_core::{CommandOutput, ServiceConfig};
use async_trait::async_trait;
use tokio::process::Command as AsyncCommand;
use tracing::info;

use crate::{
    error::{ExecError, Result},
    injection,
    types::ProcessOutput,
};

/// Runs a service's full command sequence against one payload.
///
/// The scheduler only sees this trait, so tests can substitute a recorder
/// for real subprocesses.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Execute every command of `service` in order and return one
    /// [`CommandOutput`] per command. Stops at the first failure.
    async fn run(
        &self,
        name: &str,
        service: &ServiceConfig,
        payload: &str,
    ) -> Result<Vec<CommandOutput>>;
}

/// Spawns each command through `sh -c` in the service's directory.
pub struct ProcessRunner {
    shell: String,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self {
            shell: "sh".to_string(),
        }
    }

    /// Run a single, already-injected shell line and buffer everything it
    /// produces.
    pub async fn exec(&self, line: &str, cwd: &str, timeout: Option<Duration>) -> ProcessOutput {
        let child = match AsyncCommand::new(&self.shell)
            .arg("-c")
            .arg(line)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return ProcessOutput::failed(ExecError::Spawn {
                    command: line.to_string(),
                    reason: e.to_string(),
                })
            }
        };

        // Dropping the wait future on timeout drops the child, and
        // kill_on_drop sends SIGKILL.
        let waited = match timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(result) => result,
                Err(_elapsed) => {
                    return ProcessOutput::failed(ExecError::Timeout {
                        command: line.to_string(),
                        ms: limit.as_millis() as u64,
                    })
                }
            },
            None => child.wait_with_output().await,
        };

        let output = match waited {
            Ok(output) => output,
            Err(e) => return ProcessOutput::failed(ExecError::IoError(e)),
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let failure = (!output.status.success()).then(|| ExecError::Failed {
            command: line.to_string(),
            status: output.status.to_string(),
            stderr: stderr.trim().to_string(),
        });

        ProcessOutput {
            stdout,
            stderr,
            failure,
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        name: &str,
        service: &ServiceConfig,
        payload: &str,
    ) -> Result<Vec<CommandOutput>> {
        info!(service = %name, "Launching service {name}");

        let mut outputs = Vec::with_capacity(service.commands.len());

        for command in &service.commands {
            let line = injection::build_command(
                command,
                service.injection,
                &service.injection_variable,
                payload,
            );
            info!(service = %name, injection = %service.injection, "> {line}");

            let output = self.exec(&line, &service.directory, service.timeout()).await;
            output.log();

            if let Some(failure) = output.failure {
                return Err(failure);
            }

            outputs.push(CommandOutput {
                command: command.clone(),
                output: service.show_output.then_some(output.stdout),
            });
        }

        Ok(outputs)
    }
}
