//! Provider configuration structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{APPLICATION_API_PATH, CLIENT_API_PATH};

/// Raw provider configuration as supplied by the host, a file or the
/// environment. Every field is optional until resolution.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub use_application: Option<bool>,
    #[serde(default)]
    pub debug: Option<bool>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("host", &self.host)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("use_application", &self.use_application)
            .field("debug", &self.debug)
            .finish()
    }
}

/// One of the two disjoint API URL namespaces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiNamespace {
    /// Administrative API (`/api/application`)
    #[default]
    Application,
    /// Self-service API (`/api/client`)
    Client,
}

impl ApiNamespace {
    pub fn from_use_application(use_application: bool) -> Self {
        if use_application {
            Self::Application
        } else {
            Self::Client
        }
    }

    /// Path appended to the host
    pub fn path(&self) -> &'static str {
        match self {
            Self::Application => APPLICATION_API_PATH,
            Self::Client => CLIENT_API_PATH,
        }
    }
}

/// Configuration after defaults and environment fallbacks were applied
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub host: String,
    pub api_key: String,
    pub namespace: ApiNamespace,
    pub debug: bool,
    /// Non-fatal diagnostics produced while resolving
    pub warnings: Vec<String>,
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("host", &self.host)
            .field("api_key", &"***")
            .field("namespace", &self.namespace)
            .field("debug", &self.debug)
            .field("warnings", &self.warnings)
            .finish()
    }
}
