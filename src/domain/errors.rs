//! Domain errors for the kapacitor-unit test orchestrator.

use std::path::PathBuf;

use thiserror::Error;

/// Domain-level errors that can occur while compiling, running or tearing
/// down a unit test.
///
/// A failed count comparison is not an error: it is reported through
/// [`TestResult::passed`](crate::domain::models::TestResult::passed).
#[derive(Debug, Error)]
pub enum DomainError {
    /// The declaration is structurally invalid (e.g. both seed modes set).
    #[error("Invalid test configuration: {0}")]
    Config(String),

    /// The declared test kind has no matching test implementation.
    #[error("not supported configuration type: {kind} in configuration: {declaration}")]
    UnsupportedType { kind: String, declaration: String },

    /// The TICKscript backing a task could not be read.
    #[error("Script not found at {}: {reason}", path.display())]
    ScriptNotFound { path: PathBuf, reason: String },

    /// A collaborator call failed or answered with a non-2xx status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The task status carries no `alert*` node.
    #[error("kapacitor.status: expected alert.* key to be found on stats of task {0}")]
    NoAlertNode(String),

    /// An aggregated alert statistic is not numeric.
    #[error("kapacitor.status: wrong response from service: {key} is not numeric")]
    MalformedStatus { key: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl DomainError {
    /// Whether the error was raised before any artifact was created.
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::UnsupportedType { .. })
    }

    /// Whether the error comes from an unexpected status payload.
    pub const fn is_protocol(&self) -> bool {
        matches!(self, Self::NoAlertNode(_) | Self::MalformedStatus { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for DomainError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<reqwest::Error> for DomainError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
