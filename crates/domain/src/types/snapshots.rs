//! Query parameters and computed snapshots for read-only queries

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Parameters naming a single server by its short identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerQuery {
    pub server_id: String,
}

/// The server list query takes no parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServersQuery {}

/// Parameters for the console log query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogsQuery {
    pub server_id: String,
    /// Number of lines requested; unset or zero means the default
    #[serde(default)]
    pub lines: Option<u32>,
}

/// Resource limits of a server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerLimits {
    pub memory: i64,
    pub swap: i64,
    pub disk: i64,
    pub io: i64,
    pub cpu: i64,
}

/// Feature limits of a server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureLimits {
    pub databases: i64,
    pub allocations: i64,
    pub backups: i64,
}

/// Network allocation; empty IP and port 0 when none is marked default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Allocation {
    pub id: Option<i64>,
    pub ip: String,
    pub port: i64,
}

/// Detailed view of one server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSnapshot {
    pub server_id: String,
    pub id: String,
    pub identifier: String,
    pub internal_id: i64,
    pub uuid: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub is_suspended: bool,
    pub is_installing: bool,
    pub is_transferring: bool,
    pub node: String,
    pub sftp_ip: String,
    pub sftp_port: i64,
    pub invocation: String,
    pub docker_image: String,
    pub limits: ServerLimits,
    pub allocation: Allocation,
    pub environment: BTreeMap<String, String>,
    pub egg_features: Option<Vec<String>>,
    pub feature_limits: FeatureLimits,
    pub user_permissions: Option<Vec<String>>,
}

/// One entry of the server list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSummary {
    pub identifier: String,
    pub internal_id: i64,
    pub uuid: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub node: String,
    pub is_suspended: bool,
    pub server_owner: bool,
    pub docker_image: String,
    pub invocation: String,
    pub limits: ServerLimits,
    pub allocation: Allocation,
}

/// Every server visible to the API key, in API order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServersSnapshot {
    pub servers: Vec<ServerSummary>,
}

/// Live resource usage of a server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationSnapshot {
    pub server_id: String,
    pub state: String,
    pub cpu_percent: f64,
    pub memory_bytes: i64,
    pub memory_mb: f64,
    pub disk_bytes: i64,
    pub disk_mb: f64,
    pub network_rx_bytes: i64,
    pub network_tx_bytes: i64,
    pub uptime_seconds: i64,
}

/// Startup configuration of a server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupSnapshot {
    pub server_id: String,
    pub startup_command: String,
    pub egg_id: Option<i64>,
    pub docker_image: String,
    pub environment: BTreeMap<String, String>,
}

/// Recent console output, most recent line first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogsSnapshot {
    pub server_id: String,
    /// Effective number of lines requested
    pub lines: u32,
    pub logs: Vec<String>,
    /// Timestamps parallel to `logs`
    pub timestamps: Vec<String>,
}
