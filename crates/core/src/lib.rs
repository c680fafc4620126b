//! # KineticPanel Core
//!
//! Reconciliation logic - no HTTP code.
//!
//! This crate contains:
//! - The `Transport` port and the resource/query adapter contracts
//! - Entity codecs between API JSON and typed records
//! - The seven resource adapters and five query adapters
//! - Change planning (update in place vs. replace)
//!
//! ## Architecture Principles
//! - Only depends on `kineticpanel-domain`
//! - All network access goes through [`ports::Transport`]
//! - Adapters hold no state beyond their configured transport

pub mod codec;
pub mod console;
pub mod erased;
pub mod plan;
pub mod ports;
pub mod queries;
pub mod reconcile;
pub mod resources;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use erased::{DynQuery, DynResource};
pub use plan::{plan_change, plan_records, PlannedChange};
pub use ports::{Adapter, QueryAdapter, ReadOutcome, ResourceAdapter, Transport, TransportSlot};
pub use queries::{
    ActivityLogsQueryAdapter, ServerQueryAdapter, ServersQueryAdapter, StartupQueryAdapter,
    UtilizationQueryAdapter,
};
pub use resources::{
    ActionResource, CommandResource, DockerImageResource, PowerResource, ReinstallResource,
    RenameResource, ServerAction, ServerResource, StartupVariableResource,
};
