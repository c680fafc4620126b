//! Authenticated Kinetic Panel API client
//!
//! Sends JSON requests to one API namespace of a panel host and hands raw
//! response bodies to the codecs in `kineticpanel-core`. Requests are sent
//! exactly once; any non-2xx status becomes `PanelError::Api` carrying the
//! status code and the body text.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kineticpanel_core::Transport;
use kineticpanel_domain::constants::{REDACTED_AUTHORIZATION, REQUEST_TIMEOUT_SECS};
use kineticpanel_domain::{ApiNamespace, PanelError, ResolvedConfig, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::errors::InfraError;
use crate::http::HttpClient;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Configuration for [`PanelClient`]
#[derive(Clone)]
pub struct ClientConfig {
    /// Panel host, e.g. `https://kineticpanel.net`
    pub host: String,
    pub api_key: String,
    pub namespace: ApiNamespace,
    /// Log full request/response diagnostics
    pub debug: bool,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: api_key.into(),
            namespace: ApiNamespace::default(),
            debug: false,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

impl From<&ResolvedConfig> for ClientConfig {
    fn from(resolved: &ResolvedConfig) -> Self {
        Self {
            host: resolved.host.clone(),
            api_key: resolved.api_key.clone(),
            namespace: resolved.namespace,
            debug: resolved.debug,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("api_key", &"***")
            .field("namespace", &self.namespace)
            .field("debug", &self.debug)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Transport Client bound to one panel host and namespace
pub struct PanelClient {
    http_client: Arc<HttpClient>,
    base_url: String,
    api_key: String,
    debug: bool,
}

impl PanelClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns `PanelError::Config` if the host is not an absolute URL or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = format!("{}{}", config.host.trim_end_matches('/'), config.namespace.path());
        url::Url::parse(&base_url)
            .map_err(|err| PanelError::Config(format!("invalid host {:?}: {err}", config.host)))?;

        let http_client = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(concat!("kineticpanel/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| PanelError::Config(format!("Failed to build HttpClient: {err}")))?;

        Ok(Self {
            http_client: Arc::new(http_client),
            base_url,
            api_key: config.api_key,
            debug: config.debug,
        })
    }

    /// Host plus namespace path, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn execute(&self, method: Method, path: &str, payload: Option<&Value>) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .http_client
            .request(method.clone(), &url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(ACCEPT, JSON_MEDIA_TYPE);

        if let Some(body) = payload {
            request = request.header(CONTENT_TYPE, JSON_MEDIA_TYPE).body(serde_json::to_vec(body)?);
        }

        if self.debug {
            let request_body = payload.map(Value::to_string).unwrap_or_default();
            debug!(
                %method,
                %url,
                authorization = REDACTED_AUTHORIZATION,
                accept = JSON_MEDIA_TYPE,
                body = %request_body,
                "API request"
            );
        }

        let response = self.http_client.send(request).await?;
        let status = response.status();
        let body = response.bytes().await.map_err(|err| PanelError::from(InfraError::from(err)))?;

        if self.debug {
            debug!(
                %method,
                %url,
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&body),
                "API response"
            );
        }

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body).into_owned();
            error!(%method, %url, status = status.as_u16(), body = %text, "API request failed");
            return Err(PanelError::Api { status: status.as_u16(), body: text });
        }

        Ok(body.to_vec())
    }
}

#[async_trait]
impl Transport for PanelClient {
    #[instrument(skip(self), fields(path = %path))]
    async fn get(&self, path: &str) -> Result<Vec<u8>> {
        self.execute(Method::GET, path, None).await
    }

    #[instrument(skip(self, payload), fields(path = %path))]
    async fn post(&self, path: &str, payload: Option<&Value>) -> Result<Vec<u8>> {
        self.execute(Method::POST, path, payload).await
    }

    #[instrument(skip(self, payload), fields(path = %path))]
    async fn patch(&self, path: &str, payload: &Value) -> Result<Vec<u8>> {
        self.execute(Method::PATCH, path, Some(payload)).await
    }

    #[instrument(skip(self), fields(path = %path))]
    async fn delete(&self, path: &str) -> Result<()> {
        self.execute(Method::DELETE, path, None).await.map(|_| ())
    }
}

impl std::fmt::Debug for PanelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("debug", &self.debug)
            .finish()
    }
}
