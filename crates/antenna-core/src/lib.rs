//! antenna-core: configuration, shared types and errors for the Antenna
//! webhook relay.

pub mod config;
pub mod error;
pub mod types;

pub use config::{AntennaConfig, ServerConfig, ServiceConfig};
pub use error::{AntennaError, Result};
pub use types::{CommandOutput, Injection, InvocationId};
