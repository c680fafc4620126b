//! Synthetic identities for action-style resources
//!
//! Power signals, console commands, renames and the other one-shot actions
//! have no durable remote identifier. Their identity is built from the
//! parent server identifier plus a suffix naming the action, so the same
//! inputs always produce the same identity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::IMPORT_DELIMITER;
use crate::errors::{PanelError, Result};

/// Action performed against a server that has no remote identity of its own
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Power,
    Command,
    Rename,
    DockerImage,
    Reinstall,
    StartupVariable(String),
}

impl ActionKind {
    /// Suffix appended to the parent identifier
    pub fn suffix(&self) -> String {
        match self {
            Self::Power => "-power".to_string(),
            Self::Command => "-cmd".to_string(),
            Self::Rename => "-rename".to_string(),
            Self::DockerImage => "-docker".to_string(),
            Self::Reinstall => "-reinstall".to_string(),
            Self::StartupVariable(key) => format!("-var-{key}"),
        }
    }
}

/// Deterministic `<parent><suffix>` identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyntheticId(String);

impl SyntheticId {
    /// Build the identity for `action` on server `parent`.
    ///
    /// Both the parent and a startup variable key are limited to ASCII
    /// letters, digits and `_`. Suffixes start with `-`, so a `-` in either
    /// input could make two different actions share one identity.
    ///
    /// # Errors
    /// Returns `PanelError::InvalidInput` if the parent identifier is not a
    /// usable server identifier or a startup variable key is empty or holds
    /// characters outside `[A-Za-z0-9_]`.
    pub fn new(parent: &str, action: &ActionKind) -> Result<Self> {
        validate_server_identifier(parent)?;
        if !is_identity_segment(parent) {
            return Err(PanelError::InvalidInput(format!(
                "server_id may only contain ASCII letters, digits and `_`: {parent:?}"
            )));
        }
        if let ActionKind::StartupVariable(key) = action {
            if key.is_empty() {
                return Err(PanelError::InvalidInput(
                    "startup variable key must not be empty".into(),
                ));
            }
            if !is_identity_segment(key) {
                return Err(PanelError::InvalidInput(format!(
                    "startup variable key may only contain ASCII letters, digits and `_`: {key:?}"
                )));
            }
        }
        Ok(Self(format!("{parent}{}", action.suffix())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SyntheticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_identity_segment(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Check a short server identifier supplied by the caller.
///
/// # Errors
/// Returns `PanelError::InvalidInput` for empty identifiers or identifiers
/// containing whitespace or path separators.
pub fn validate_server_identifier(server_id: &str) -> Result<()> {
    if server_id.is_empty() {
        return Err(PanelError::InvalidInput("server_id must not be empty".into()));
    }
    if server_id.chars().any(|c| c.is_whitespace() || c == '/' || c == '?' || c == '#') {
        return Err(PanelError::InvalidInput(format!(
            "server_id contains characters not allowed in a path segment: {server_id:?}"
        )));
    }
    Ok(())
}

/// Split a composite import token into exactly `arity` parts.
///
/// # Errors
/// Returns `PanelError::Import` when the token does not have the expected
/// number of non-empty parts; `format` describes the expected shape.
pub fn split_import_token<'a>(token: &'a str, arity: usize, format: &str) -> Result<Vec<&'a str>> {
    let parts: Vec<&str> = token.split(IMPORT_DELIMITER).collect();
    if parts.len() != arity || parts.iter().any(|part| part.is_empty()) {
        return Err(PanelError::Import(format!(
            "Invalid Import ID {token:?}. Expected format: {format}"
        )));
    }
    Ok(parts)
}
