//! Error types used throughout the reconciler

use std::fmt;

use thiserror::Error;

/// Lifecycle operation an adapter was performing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
    Query,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Import => "import",
            Self::Query => "query",
        };
        f.write_str(label)
    }
}

/// Coarse classification of a [`PanelError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// No response was received (connection, TLS, timeout)
    Transport,
    /// The API answered 404
    NotFound,
    /// The API answered with any other non-2xx status
    Api,
    /// The response body did not have the expected shape
    Decode,
    /// Provider configuration is missing or invalid
    Config,
    /// Caller-supplied attributes or import tokens are invalid
    Input,
}

/// Main error type for the reconciler
#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("{0} used before the provider configured it")]
    NotConfigured(String),

    #[error("{op} {resource} failed: {source}")]
    Operation {
        op: Operation,
        resource: String,
        #[source]
        source: Box<PanelError>,
    },
}

impl PanelError {
    /// Wrap this error with the operation and resource type that produced it.
    ///
    /// Already-labelled errors are returned untouched so a failure is never
    /// reported twice.
    pub fn during(self, op: Operation, resource: impl Into<String>) -> Self {
        match self {
            labelled @ Self::Operation { .. } => labelled,
            other => Self::Operation { op, resource: resource.into(), source: Box::new(other) },
        }
    }

    /// HTTP status carried by the error, if the API produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Operation { source, .. } => source.status(),
            _ => None,
        }
    }

    /// True when the remote entity does not exist.
    ///
    /// Classified on the structured status code only; the response body is
    /// never inspected.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Get the error category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(_) => ErrorCategory::Transport,
            Self::Api { status: 404, .. } => ErrorCategory::NotFound,
            Self::Api { .. } => ErrorCategory::Api,
            Self::Decode(_) => ErrorCategory::Decode,
            Self::Config(_) | Self::NotConfigured(_) => ErrorCategory::Config,
            Self::InvalidInput(_) | Self::Import(_) => ErrorCategory::Input,
            Self::Operation { source, .. } => source.category(),
        }
    }

    /// Short summary suitable for a diagnostic title (e.g. "API Create Error").
    pub fn summary(&self) -> String {
        match self {
            Self::Operation { op, source, .. } => {
                let op = op.to_string();
                let mut chars = op.chars();
                let op = match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => op,
                };
                match source.category() {
                    ErrorCategory::Decode => format!("JSON Parse Error during {op}"),
                    ErrorCategory::Input => format!("Invalid {op} Input"),
                    _ => format!("API {op} Error"),
                }
            }
            Self::Config(_) | Self::NotConfigured(_) => "Missing configuration".to_string(),
            _ => "Kinetic Panel Error".to_string(),
        }
    }
}

impl From<serde_json::Error> for PanelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for reconciler operations
pub type Result<T> = std::result::Result<T, PanelError>;
