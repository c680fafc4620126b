//! Configuration loading and resolution
//!
//! This module provides utilities for loading provider configuration from
//! environment variables and files and for resolving it into the values the
//! Transport Client is built from.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, probe_config_paths, resolve};
