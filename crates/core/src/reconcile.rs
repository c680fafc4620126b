//! Applying a planned change through a resource adapter

use kineticpanel_domain::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::plan::{plan_records, PlannedChange};
use crate::ports::ResourceAdapter;

/// Converge a managed entity from `prior` to `desired`.
///
/// Mutable-only deltas go through [`ResourceAdapter::update`]. A delta on
/// any required-replace attribute deletes the entity and creates a new one;
/// `update` is never called in that case.
///
/// # Errors
/// Propagates the first failing adapter operation.
pub async fn apply<A>(adapter: &A, prior: A::Record, desired: A::Record) -> Result<A::Record>
where
    A: ResourceAdapter,
    A::Record: Serialize,
{
    let plan = plan_records(adapter.schema(), &prior, &desired)?;
    let resource = adapter.type_name();

    match plan {
        PlannedChange::NoChange => {
            debug!(resource, "no change");
            Ok(prior)
        }
        PlannedChange::Update { changed } => {
            debug!(resource, ?changed, "updating in place");
            adapter.update(&prior, desired).await
        }
        PlannedChange::Replace { changed } => {
            info!(resource, ?changed, "replacing");
            adapter.delete(&prior).await?;
            adapter.create(desired).await
        }
    }
}
