//! Shared lifecycle for action-style resources
//!
//! Actions are one-shot POSTs against a server. The panel keeps no record
//! of them, so:
//! - create and update submit the action and synthesize the identity,
//! - read passes the known record through unchanged,
//! - delete only forgets the record.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use kineticpanel_domain::{
    validate_server_identifier, ActionKind, Operation, PanelError, ResourceSchema, Result,
    SyntheticId,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::ports::{Adapter, ReadOutcome, ResourceAdapter, Transport, TransportSlot};

/// A record that describes one action against a server
pub trait ServerAction: Clone + fmt::Debug + Send + Sync + 'static {
    /// Schema of the resource type
    const SCHEMA: &'static ResourceSchema;

    /// Endpoint below `/servers/{server_id}/`
    const ENDPOINT: &'static str;

    fn server_id(&self) -> &str;

    fn kind(&self) -> ActionKind;

    /// Request body for the action endpoint
    fn payload(&self) -> Result<Value>;

    fn identity(&self) -> Option<&SyntheticId>;

    #[must_use]
    fn with_identity(self, id: SyntheticId) -> Self;

    /// Reconstruct a record from an import token. Only called when the
    /// schema is marked importable.
    fn from_import_token(token: &str) -> Result<Self> {
        Err(PanelError::Import(format!("cannot import {token:?}")))
    }
}

/// Resource adapter for any [`ServerAction`]
pub struct ActionResource<R> {
    transport: TransportSlot,
    _record: PhantomData<fn() -> R>,
}

impl<R: ServerAction> ActionResource<R> {
    pub fn new() -> Self {
        Self { transport: TransportSlot::default(), _record: PhantomData }
    }

    fn resource_name() -> &'static str {
        R::SCHEMA.type_name
    }

    /// Submit the action and return the record carrying its identity.
    async fn submit(&self, record: R, identity: Option<SyntheticId>) -> Result<R> {
        let server_id = record.server_id();
        validate_server_identifier(server_id)?;
        let id = match identity {
            Some(id) => id,
            None => SyntheticId::new(server_id, &record.kind())?,
        };

        let payload = record.payload()?;
        let path = format!("/servers/{server_id}/{}", R::ENDPOINT);
        self.transport.get(Self::resource_name())?.post(&path, Some(&payload)).await?;

        info!(resource = Self::resource_name(), %id, "action submitted");
        Ok(record.with_identity(id))
    }
}

impl<R: ServerAction> Default for ActionResource<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ServerAction> fmt::Debug for ActionResource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionResource")
            .field("type_name", &Self::resource_name())
            .field("transport", &self.transport)
            .finish()
    }
}

impl<R: ServerAction> Adapter for ActionResource<R> {
    fn schema(&self) -> &'static ResourceSchema {
        R::SCHEMA
    }

    fn configure(&mut self, transport: Arc<dyn Transport>) {
        self.transport.set(transport);
    }
}

#[async_trait]
impl<R: ServerAction> ResourceAdapter for ActionResource<R> {
    type Record = R;

    async fn create(&self, desired: R) -> Result<R> {
        self.submit(desired, None)
            .await
            .map_err(|err| err.during(Operation::Create, Self::resource_name()))
    }

    async fn read(&self, current: R) -> Result<ReadOutcome<R>> {
        Ok(ReadOutcome::Present(current))
    }

    /// Re-submits the action; the identity of `prior` is kept.
    async fn update(&self, prior: &R, desired: R) -> Result<R> {
        self.submit(desired, prior.identity().cloned())
            .await
            .map_err(|err| err.during(Operation::Update, Self::resource_name()))
    }

    async fn delete(&self, current: &R) -> Result<()> {
        debug!(
            resource = Self::resource_name(),
            id = ?current.identity(),
            "action is irreversible, forgetting record"
        );
        Ok(())
    }

    async fn import(&self, token: &str) -> Result<R> {
        let imported = if R::SCHEMA.importable {
            R::from_import_token(token).and_then(|record| {
                let id = SyntheticId::new(record.server_id(), &record.kind())?;
                Ok(record.with_identity(id))
            })
        } else {
            Err(PanelError::Import(format!("{} does not support import", Self::resource_name())))
        };
        imported.map_err(|err| err.during(Operation::Import, Self::resource_name()))
    }
}
