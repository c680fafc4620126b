//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! reconciler.

// Provider identity
pub const PROVIDER_TYPE_NAME: &str = "kineticpanel";
pub const DEFAULT_HOST: &str = "https://kineticpanel.net";

// API namespaces
pub const APPLICATION_API_PATH: &str = "/api/application";
pub const CLIENT_API_PATH: &str = "/api/client";

// Transport
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const REDACTED_AUTHORIZATION: &str = "Bearer ***";

// Environment variables
pub const ENV_HOST: &str = "KINETICPANEL_HOST";
pub const ENV_API_KEY: &str = "KINETICPANEL_API_KEY";
pub const ENV_USE_APPLICATION: &str = "KINETICPANEL_USE_APPLICATION";
pub const ENV_DEBUG: &str = "KINETICPANEL_DEBUG";

// Console log queries
pub const DEFAULT_LOG_LINES: u32 = 50;
pub const MAX_LOG_LINES: u32 = 100;
pub const CONSOLE_OUTPUT_EVENT: &str = "console output";

// Unit conversion
pub const BYTES_PER_MEGABYTE: i64 = 1_048_576;

// Import tokens
pub const IMPORT_DELIMITER: char = ':';
