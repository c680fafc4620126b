//! # KineticPanel Domain
//!
//! Data types for the Kinetic Panel reconciler.
//!
//! This crate contains:
//! - Managed records and query snapshots
//! - Attribute schemas and mutability classes
//! - Synthetic identities for action-style resources
//! - Error types and Result definitions
//! - Provider configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other KineticPanel crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod identity;
pub mod macros;
pub mod schema;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use identity::{split_import_token, validate_server_identifier, ActionKind, SyntheticId};
pub use schema::*;
pub use types::*;
