//! # KineticPanel Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The reqwest-based HTTP client
//! - The authenticated Transport Client for the panel API
//! - Configuration loading (environment, `.env`, TOML/JSON files)
//! - Tracing initialisation
//! - The provider root holding the adapter registry
//!
//! ## Architecture
//! - Implements traits defined in `kineticpanel-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod provider;

// Re-export commonly used items
pub use api::{ClientConfig, PanelClient};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::init_tracing;
pub use provider::Provider;
