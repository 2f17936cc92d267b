use figment::{
    providers::{Env, Format, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use crate::error::{AntennaError, Result};
use crate::types::Injection;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_CONFIG_PATH: &str = "./antenna.toml";
pub const DEFAULT_INJECTION_VARIABLE: &str = "ANTENNA_BODY";
pub const DEFAULT_SECRET_HEADER: &str = "x-hub-signature-256";
pub const MAX_BODY_BYTES: usize = 25 * 1024 * 1024; // GitHub caps webhook payloads at 25 MB

/// Top-level config (antenna.toml / antenna.yaml + ANTENNA_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AntennaConfig {
    #[serde(default)]
    pub server: ServerConfig,
    /// Service name → descriptor. The name is the scheduling key.
    #[serde(default)]
    pub services: BTreeMap<String, ServiceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Expose the built-in `GET /ping` health route.
    #[serde(default = "bool_true")]
    pub allow_ping: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            allow_ping: true,
        }
    }
}

/// A single path → command-sequence binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// URL path the service answers on. `url` is accepted for older configs.
    #[serde(alias = "url")]
    pub path: String,
    /// Working directory for every command.
    pub directory: String,
    /// Shell commands, run in order.
    pub commands: Vec<String>,
    #[serde(default)]
    pub injection: Injection,
    #[serde(default = "default_injection_variable")]
    pub injection_variable: String,
    /// Debounce window in seconds; 0 runs immediately.
    #[serde(default)]
    pub delay: f64,
    /// Fire-and-forget when there is no delay.
    #[serde(default, rename = "async")]
    pub run_async: bool,
    pub secret: Option<String>,
    pub secret_header: Option<String>,
    #[serde(default)]
    pub show_output: bool,
    /// Per-command time limit in seconds. Unlimited when absent.
    pub timeout: Option<u64>,
}

impl ServiceConfig {
    /// Minimal descriptor: no injection, no delay, no secret.
    pub fn new(
        path: impl Into<String>,
        directory: impl Into<String>,
        commands: Vec<String>,
    ) -> Self {
        Self {
            path: path.into(),
            directory: directory.into(),
            commands,
            injection: Injection::None,
            injection_variable: default_injection_variable(),
            delay: 0.0,
            run_async: false,
            secret: None,
            secret_header: None,
            show_output: false,
            timeout: None,
        }
    }

    /// Header carrying the HMAC signature for secured services.
    pub fn secret_header(&self) -> &str {
        self.secret_header
            .as_deref()
            .filter(|h| !h.is_empty())
            .unwrap_or(DEFAULT_SECRET_HEADER)
    }

    /// The debounce window, or `None` when the service runs immediately.
    /// Values that do not fit a `Duration` also yield `None`; `validate`
    /// rejects them up front.
    pub fn delay(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.delay)
            .ok()
            .filter(|d| !d.is_zero())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// Collect every validation issue for this service, prefixed with `name`.
    fn issues(&self, name: &str) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.path.starts_with('/') {
            issues.push(format!("{name}.path: must start with '/' (got {:?})", self.path));
        }
        if self.commands.is_empty() {
            issues.push(format!("{name}.commands: at least one command is required"));
        }
        if Duration::try_from_secs_f64(self.delay).is_err() {
            issues.push(format!(
                "{name}.delay: must be a non-negative number of seconds (got {})",
                self.delay
            ));
        }
        if matches!(self.injection, Injection::Variable | Injection::Argv)
            && self.injection_variable.trim().is_empty()
        {
            issues.push(format!("{name}.injection_variable: must not be empty"));
        }
        if self.timeout == Some(0) {
            issues.push(format!("{name}.timeout: must be greater than zero"));
        }
        if !Path::new(&self.directory).is_dir() {
            issues.push(format!("{name}.directory: {} is not a directory", self.directory));
        }

        issues
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_injection_variable() -> String {
    DEFAULT_INJECTION_VARIABLE.to_string()
}
fn bool_true() -> bool {
    true
}

impl AntennaConfig {
    /// Load config from a TOML or YAML file with ANTENNA_* env var overrides.
    ///
    /// The file is chosen in order:
    ///   1. Explicit path argument
    ///   2. `ANTENNA_CONFIG` env var
    ///   3. `./antenna.toml`
    ///
    /// Nested env keys use a double underscore: `ANTENNA_SERVER__PORT=4000`.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path
            .map(String::from)
            .or_else(|| std::env::var("ANTENNA_CONFIG").ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        if !Path::new(&path).is_file() {
            return Err(AntennaError::Config(format!("could not read {path}")));
        }

        tracing::info!(path = %path, "reading configuration file");

        let config: AntennaConfig = Self::figment(&path)
            .extract()
            .map_err(|e| AntennaError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Build the layered provider stack for `path` without extracting.
    pub fn figment(path: &str) -> Figment {
        let figment = if is_yaml(path) {
            Figment::new().merge(Yaml::file(path))
        } else {
            Figment::new().merge(Toml::file(path))
        };
        figment.merge(Env::prefixed("ANTENNA_").split("__"))
    }

    /// Check every service and report all problems at once.
    pub fn validate(&self) -> Result<()> {
        let issues: Vec<String> = self
            .services
            .iter()
            .flat_map(|(name, service)| service.issues(name))
            .collect();

        if issues.is_empty() {
            Ok(())
        } else {
            Err(AntennaError::Invalid { issues })
        }
    }
}

fn is_yaml(path: &str) -> bool {
    matches!(
        Path::new(path).extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}
