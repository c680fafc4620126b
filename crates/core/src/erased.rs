//! Type-erased adapters
//!
//! The host exchanges attribute values as JSON. These traits let the
//! provider keep every adapter in one registry regardless of its record
//! type, and are implemented for every typed adapter automatically.

use async_trait::async_trait;
use kineticpanel_domain::{Operation, PanelError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::ports::{Adapter, QueryAdapter, ReadOutcome, ResourceAdapter};
use crate::reconcile;

/// Resource lifecycle over JSON records
#[async_trait]
pub trait DynResource: Adapter {
    async fn create_json(&self, desired: Value) -> Result<Value>;

    async fn read_json(&self, current: Value) -> Result<ReadOutcome<Value>>;

    async fn update_json(&self, prior: Value, desired: Value) -> Result<Value>;

    async fn delete_json(&self, current: Value) -> Result<()>;

    async fn import_json(&self, token: &str) -> Result<Value>;

    /// Plan and apply the change from `prior` to `desired`
    async fn apply_json(&self, prior: Value, desired: Value) -> Result<Value>;
}

/// Query over JSON parameters and snapshots
#[async_trait]
pub trait DynQuery: Adapter {
    async fn query_json(&self, params: Value) -> Result<Value>;
}

#[async_trait]
impl<A> DynResource for A
where
    A: ResourceAdapter,
    A::Record: Serialize + DeserializeOwned,
{
    async fn create_json(&self, desired: Value) -> Result<Value> {
        let desired = from_json(self, Operation::Create, desired)?;
        to_json(self, Operation::Create, &self.create(desired).await?)
    }

    async fn read_json(&self, current: Value) -> Result<ReadOutcome<Value>> {
        let current = from_json(self, Operation::Read, current)?;
        match self.read(current).await? {
            ReadOutcome::Present(record) => {
                Ok(ReadOutcome::Present(to_json(self, Operation::Read, &record)?))
            }
            ReadOutcome::Gone => Ok(ReadOutcome::Gone),
        }
    }

    async fn update_json(&self, prior: Value, desired: Value) -> Result<Value> {
        let prior = from_json(self, Operation::Update, prior)?;
        let desired = from_json(self, Operation::Update, desired)?;
        to_json(self, Operation::Update, &self.update(&prior, desired).await?)
    }

    async fn delete_json(&self, current: Value) -> Result<()> {
        let current = from_json(self, Operation::Delete, current)?;
        self.delete(&current).await
    }

    async fn import_json(&self, token: &str) -> Result<Value> {
        to_json(self, Operation::Import, &self.import(token).await?)
    }

    async fn apply_json(&self, prior: Value, desired: Value) -> Result<Value> {
        let prior = from_json(self, Operation::Update, prior)?;
        let desired = from_json(self, Operation::Update, desired)?;
        to_json(self, Operation::Update, &reconcile::apply(self, prior, desired).await?)
    }
}

#[async_trait]
impl<Q> DynQuery for Q
where
    Q: QueryAdapter,
    Q::Params: DeserializeOwned,
    Q::Snapshot: Serialize,
{
    async fn query_json(&self, params: Value) -> Result<Value> {
        let params = from_json(self, Operation::Query, params)?;
        to_json(self, Operation::Query, &self.read(params).await?)
    }
}

fn from_json<T: DeserializeOwned>(
    adapter: &(impl Adapter + ?Sized),
    op: Operation,
    value: Value,
) -> Result<T> {
    serde_json::from_value(value).map_err(|err| {
        PanelError::InvalidInput(err.to_string()).during(op, adapter.type_name())
    })
}

fn to_json<T: Serialize>(adapter: &(impl Adapter + ?Sized), op: Operation, value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|err| PanelError::from(err).during(op, adapter.type_name()))
}
