//! antenna-process runs a service's command sequence on the host.
//!
//! Each configured command is launched through `sh -c` in the service's
//! working directory, one after the other. The request payload is exposed
//! to the command according to the service's [`Injection`] mode, and stdout
//! and stderr are fully buffered before the next command starts.
//!
//! The first failing command aborts the sequence.
//!
//! [`Injection`]: antenna_core::Injection

#[cfg(test)]
mod capture;
pub mod error;
pub mod injection;
pub mod runner;
pub mod types;

pub use error::{ExecError, Result};
pub use runner::{CommandRunner, ProcessRunner};
pub use types::ProcessOutput;
