//! Domain types and models
//!
//! Managed records (resources) and computed snapshots (queries). Every
//! type has a fixed attribute set; there is no dynamically-typed container.

pub mod actions;
pub mod server;
pub mod snapshots;

pub use actions::{
    CommandRecord, DockerImageRecord, PowerRecord, PowerSignal, ReinstallRecord, RenameRecord,
    StartupVariableRecord,
};
pub use server::ServerRecord;
pub use snapshots::{
    ActivityLogsQuery, ActivityLogsSnapshot, Allocation, FeatureLimits, ServerLimits, ServerQuery,
    ServerSnapshot, ServerSummary, ServersQuery, ServersSnapshot, StartupSnapshot,
    UtilizationSnapshot,
};
