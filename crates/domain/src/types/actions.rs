//! Managed records for action-style resources
//!
//! These resources represent one-shot calls against a server. None of them
//! has a persistent remote representation; their `id` is synthetic.

use serde::{Deserialize, Serialize};

use crate::identity::SyntheticId;
use crate::impl_wire_enum_conversions;

/// Power action accepted by the power endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerSignal {
    Start,
    Stop,
    Restart,
    Kill,
}

impl_wire_enum_conversions!(PowerSignal {
    Start => "start",
    Stop => "stop",
    Restart => "restart",
    Kill => "kill",
});

/// Power signal sent to a server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerRecord {
    pub server_id: String,
    /// Unset only for records reconstructed by import
    #[serde(default)]
    pub signal: Option<PowerSignal>,
    #[serde(default)]
    pub id: Option<SyntheticId>,
}

/// Console command sent to a server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub server_id: String,
    pub command: String,
    #[serde(default)]
    pub id: Option<SyntheticId>,
}

/// Server rename (name and optional description)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRecord {
    pub server_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub id: Option<SyntheticId>,
}

/// Reinstall trigger (wipes data and redeploys)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReinstallRecord {
    pub server_id: String,
    #[serde(default)]
    pub force: Option<bool>,
    #[serde(default)]
    pub id: Option<SyntheticId>,
}

/// Docker image change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerImageRecord {
    pub server_id: String,
    #[serde(default)]
    pub docker_image: Option<String>,
    #[serde(default)]
    pub id: Option<SyntheticId>,
}

/// Single startup environment variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupVariableRecord {
    pub server_id: String,
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub id: Option<SyntheticId>,
}
