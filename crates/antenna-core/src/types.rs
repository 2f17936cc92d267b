use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// How the request payload is made available to each configured command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Injection {
    /// Command runs verbatim; the payload is not exposed.
    #[default]
    None,
    /// Payload is echoed into the command's stdin.
    Pipe,
    /// Payload is assigned to a shell variable ahead of the command.
    Variable,
    /// Payload is appended as `--<variable>="<payload>"`.
    Argv,
}

impl fmt::Display for Injection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Injection::None => "none",
            Injection::Pipe => "pipe",
            Injection::Variable => "variable",
            Injection::Argv => "argv",
        };
        f.write_str(s)
    }
}

/// One entry of an invocation's result: the configured command and,
/// when the service has `show_output` enabled, its captured stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Correlates every log line produced by a single service invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId(pub String);

impl InvocationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injection_parses_lowercase_names() {
        let modes: Vec<Injection> =
            serde_json::from_str(r#"["none","pipe","variable","argv"]"#).unwrap();
        assert_eq!(
            modes,
            vec![Injection::None, Injection::Pipe, Injection::Variable, Injection::Argv]
        );
    }

    #[test]
    fn injection_rejects_unknown_mode() {
        assert!(serde_json::from_str::<Injection>(r#""stdin""#).is_err());
    }

    #[test]
    fn command_output_omits_missing_output() {
        let out = CommandOutput { command: "make".to_string(), output: None };
        let json = serde_json::to_string(&out).unwrap();
        assert_eq!(json, r#"{"command":"make"}"#);
    }

    #[test]
    fn command_output_includes_captured_output() {
        let out = CommandOutput { command: "cat".to_string(), output: Some("123\n".to_string()) };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["output"], "123\n");
    }

    #[test]
    fn invocation_ids_are_unique() {
        assert_ne!(InvocationId::new(), InvocationId::new());
    }
}
