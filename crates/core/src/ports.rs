//! Port interfaces for reconciliation
//!
//! These traits define the boundaries between the adapters in this crate,
//! the HTTP transport implemented in `kineticpanel-infra`, and the host that
//! drives reconciliation.

use std::sync::Arc;

use async_trait::async_trait;
use kineticpanel_domain::{Operation, PanelError, ResourceSchema, Result};
use serde_json::Value;

/// Authenticated request/response transport against one API namespace.
///
/// Paths are relative to the namespace root (e.g. `/servers/abc123`).
/// Implementations return the raw body on any 2xx response and
/// `PanelError::Api` otherwise; they never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<Vec<u8>>;

    async fn post(&self, path: &str, payload: Option<&Value>) -> Result<Vec<u8>>;

    async fn patch(&self, path: &str, payload: &Value) -> Result<Vec<u8>>;

    async fn delete(&self, path: &str) -> Result<()>;
}

/// Result of refreshing a managed record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome<T> {
    /// The entity exists; the record reflects its current state
    Present(T),
    /// The entity no longer exists; the host drops it from tracked state
    Gone,
}

/// Metadata and configuration shared by resource and query adapters
pub trait Adapter: Send + Sync {
    /// Fixed attribute schema, including the type name
    fn schema(&self) -> &'static ResourceSchema;

    /// Hand the adapter the provider's transport. Called once before use.
    fn configure(&mut self, transport: Arc<dyn Transport>);

    fn type_name(&self) -> &'static str {
        self.schema().type_name
    }
}

/// Lifecycle contract of a managed entity type
///
/// Every operation either returns a complete record or fails with a
/// `PanelError::Operation` naming the operation and type; there is no
/// partial result.
#[async_trait]
pub trait ResourceAdapter: Adapter {
    type Record: Clone + Send + Sync + 'static;

    /// Create the entity and return the record with its identity assigned
    async fn create(&self, desired: Self::Record) -> Result<Self::Record>;

    /// Refresh the record from the remote system
    async fn read(&self, current: Self::Record) -> Result<ReadOutcome<Self::Record>>;

    /// Apply mutable-field changes in place. Never called for a change to a
    /// required-replace field.
    async fn update(&self, prior: &Self::Record, desired: Self::Record) -> Result<Self::Record>;

    /// Remove the entity. Deleting an entity that no longer exists succeeds.
    async fn delete(&self, current: &Self::Record) -> Result<()>;

    /// Reconstruct a record from an externally supplied identity string
    async fn import(&self, token: &str) -> Result<Self::Record> {
        let _ = token;
        Err(PanelError::Import(format!("{} does not support import", self.type_name()))
            .during(Operation::Import, self.type_name()))
    }
}

/// Read-only query producing a computed snapshot
#[async_trait]
pub trait QueryAdapter: Adapter {
    type Params: Send + Sync + 'static;
    type Snapshot: Send + 'static;

    async fn read(&self, params: Self::Params) -> Result<Self::Snapshot>;
}

/// Transport slot held by every adapter until the provider configures it
#[derive(Clone, Default)]
pub struct TransportSlot {
    transport: Option<Arc<dyn Transport>>,
}

impl TransportSlot {
    pub fn set(&mut self, transport: Arc<dyn Transport>) {
        self.transport = Some(transport);
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    /// Borrow the configured transport.
    ///
    /// # Errors
    /// Returns `PanelError::NotConfigured` naming `type_name` if the provider
    /// has not configured the adapter yet.
    pub fn get(&self, type_name: &str) -> Result<&Arc<dyn Transport>> {
        self.transport.as_ref().ok_or_else(|| PanelError::NotConfigured(type_name.to_string()))
    }
}

impl std::fmt::Debug for TransportSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportSlot").field("configured", &self.is_configured()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_slot_reports_the_type() {
        let slot = TransportSlot::default();
        assert!(!slot.is_configured());
        match slot.get("kineticpanel_server") {
            Err(PanelError::NotConfigured(name)) => assert_eq!(name, "kineticpanel_server"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("slot should be empty"),
        }
    }
}
