//! Read-only query adapters
//!
//! Each query is a single fetch-and-decode; nothing is retained between
//! calls.

pub mod activity_logs;
pub mod server;
pub mod servers;
pub mod startup;
pub mod utilization;

use kineticpanel_domain::{validate_server_identifier, Result};

pub use activity_logs::{ActivityLogsQueryAdapter, ACTIVITY_LOGS_SCHEMA, ACTIVITY_LOGS_TYPE};
pub use server::{ServerQueryAdapter, SERVER_QUERY_SCHEMA, SERVER_QUERY_TYPE};
pub use servers::{ServersQueryAdapter, SERVERS_SCHEMA, SERVERS_TYPE};
pub use startup::{StartupQueryAdapter, STARTUP_SCHEMA, STARTUP_TYPE};
pub use utilization::{UtilizationQueryAdapter, UTILIZATION_SCHEMA, UTILIZATION_TYPE};

use crate::ports::TransportSlot;

/// GET `path` through the slot's transport.
pub(crate) async fn fetch(slot: &TransportSlot, type_name: &str, path: &str) -> Result<Vec<u8>> {
    slot.get(type_name)?.get(path).await
}

/// `/servers/{server_id}{suffix}` after validating the identifier.
pub(crate) fn server_path(server_id: &str, suffix: &str) -> Result<String> {
    validate_server_identifier(server_id)?;
    Ok(format!("/servers/{server_id}{suffix}"))
}
