use thiserror::Error;

#[derive(Debug, Error)]
pub enum AntennaError {
    /// The configuration sources could not be read or deserialized.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configuration parsed but failed validation. One entry per issue,
    /// formatted as `<service>.<field>: <message>`.
    #[error("Invalid configuration:\n{}", .issues.join("\n"))]
    Invalid { issues: Vec<String> },
}

pub type Result<T> = std::result::Result<T, AntennaError>;
