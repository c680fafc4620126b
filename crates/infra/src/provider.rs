//! Provider root
//!
//! Owns the fixed registry of resource and query adapters, resolves the
//! provider configuration once and hands every adapter the same Transport
//! Client.

use std::sync::Arc;

use kineticpanel_core::{
    ActivityLogsQueryAdapter, CommandResource, DockerImageResource, DynQuery, DynResource,
    PowerResource, ReinstallResource, RenameResource, ServerQueryAdapter, ServerResource,
    ServersQueryAdapter, StartupQueryAdapter, StartupVariableResource, Transport,
    UtilizationQueryAdapter,
};
use kineticpanel_domain::constants::PROVIDER_TYPE_NAME;
use kineticpanel_domain::{ProviderConfig, ResolvedConfig, Result};
use tracing::{info, warn};

use crate::api::{ClientConfig, PanelClient};
use crate::config;

/// Entry point handed to the host
pub struct Provider {
    version: String,
    resources: Vec<Box<dyn DynResource>>,
    queries: Vec<Box<dyn DynQuery>>,
    resolved: Option<ResolvedConfig>,
}

impl Provider {
    /// Build the registry. Adapters stay unconfigured until
    /// [`Provider::configure`] runs.
    pub fn new(version: impl Into<String>) -> Self {
        let resources: Vec<Box<dyn DynResource>> = vec![
            Box::new(ServerResource::new()),
            Box::new(PowerResource::new()),
            Box::new(CommandResource::new()),
            Box::new(RenameResource::new()),
            Box::new(ReinstallResource::new()),
            Box::new(DockerImageResource::new()),
            Box::new(StartupVariableResource::new()),
        ];
        let queries: Vec<Box<dyn DynQuery>> = vec![
            Box::new(ServerQueryAdapter::new()),
            Box::new(ServersQueryAdapter::new()),
            Box::new(UtilizationQueryAdapter::new()),
            Box::new(StartupQueryAdapter::new()),
            Box::new(ActivityLogsQueryAdapter::new()),
        ];

        Self { version: version.into(), resources, queries, resolved: None }
    }

    pub fn type_name(&self) -> &'static str {
        PROVIDER_TYPE_NAME
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Resolve `config`, build the Transport Client and configure every
    /// adapter with it.
    ///
    /// Returns the non-fatal warnings produced while resolving.
    ///
    /// # Errors
    /// Returns `PanelError::Config` if the API key is missing or the host is
    /// not a usable URL. Adapters are left untouched in that case.
    pub fn configure(&mut self, config: ProviderConfig) -> Result<Vec<String>> {
        let resolved = config::resolve(config)?;
        let client = PanelClient::new(ClientConfig::from(&resolved))?;

        for warning in &resolved.warnings {
            warn!(warning = %warning, "provider configuration");
        }
        info!(
            host = %resolved.host,
            namespace = ?resolved.namespace,
            debug = resolved.debug,
            "Provider configured"
        );

        self.configure_with_transport(Arc::new(client));
        let warnings = resolved.warnings.clone();
        self.resolved = Some(resolved);
        Ok(warnings)
    }

    /// Configure from `.env`, a config file and the environment.
    ///
    /// # Errors
    /// See [`config::load`] and [`Provider::configure`].
    pub fn configure_from_environment(&mut self) -> Result<Vec<String>> {
        let config = config::load()?;
        self.configure(config)
    }

    /// Hand every adapter `transport` directly
    pub fn configure_with_transport(&mut self, transport: Arc<dyn Transport>) {
        for resource in &mut self.resources {
            resource.configure(Arc::clone(&transport));
        }
        for query in &mut self.queries {
            query.configure(Arc::clone(&transport));
        }
    }

    /// Configuration resolved by the last successful [`Provider::configure`]
    pub fn resolved_config(&self) -> Option<&ResolvedConfig> {
        self.resolved.as_ref()
    }

    pub fn resource(&self, type_name: &str) -> Option<&dyn DynResource> {
        self.resources
            .iter()
            .find(|resource| resource.type_name() == type_name)
            .map(|resource| &**resource)
    }

    pub fn query(&self, type_name: &str) -> Option<&dyn DynQuery> {
        self.queries.iter().find(|query| query.type_name() == type_name).map(|query| &**query)
    }

    pub fn resource_types(&self) -> Vec<&'static str> {
        self.resources.iter().map(|resource| resource.type_name()).collect()
    }

    pub fn query_types(&self) -> Vec<&'static str> {
        self.queries.iter().map(|query| query.type_name()).collect()
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("version", &self.version)
            .field("resources", &self.resource_types())
            .field("queries", &self.query_types())
            .field("resolved", &self.resolved)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use kineticpanel_core::testing::{MockReply, MockTransport};
    use kineticpanel_domain::PanelError;
    use serde_json::json;

    use super::*;

    #[test]
    fn registry_lists_every_adapter() {
        let provider = Provider::new("1.2.3");
        assert_eq!(provider.type_name(), "kineticpanel");
        assert_eq!(provider.version(), "1.2.3");
        assert_eq!(
            provider.resource_types(),
            vec![
                "kineticpanel_server",
                "kineticpanel_server_power",
                "kineticpanel_server_command",
                "kineticpanel_server_rename",
                "kineticpanel_server_reinstall",
                "kineticpanel_server_docker_image",
                "kineticpanel_server_startup_variable",
            ]
        );
        assert_eq!(
            provider.query_types(),
            vec![
                "kineticpanel_server",
                "kineticpanel_servers",
                "kineticpanel_server_utilization",
                "kineticpanel_server_startup",
                "kineticpanel_server_activity_logs",
            ]
        );
        assert!(provider.resource("kineticpanel_unknown").is_none());
    }

    #[tokio::test]
    async fn adapters_fail_before_configuration() {
        let provider = Provider::new("test");
        let query = provider.query("kineticpanel_servers").unwrap();

        let err = query.query_json(json!({})).await.unwrap_err();
        assert!(format!("{err}").contains("kineticpanel_servers"));
        assert_eq!(err.category(), kineticpanel_domain::ErrorCategory::Config);
    }

    #[tokio::test]
    async fn configured_transport_reaches_every_adapter() {
        let transport = MockTransport::new();
        transport.on(
            "GET",
            "/servers/abc123/startup",
            MockReply::json(json!({
                "attributes": {
                    "startup": "java -jar server.jar",
                    "egg": 4,
                    "image": "ghcr.io/pterodactyl/yolks:java_17",
                    "environment": {"SERVER_JAR": "server.jar"}
                }
            })),
        );

        let mut provider = Provider::new("test");
        provider.configure_with_transport(Arc::new(transport.clone()));

        let snapshot = provider
            .query("kineticpanel_server_startup")
            .unwrap()
            .query_json(json!({"server_id": "abc123"}))
            .await
            .unwrap();
        assert_eq!(snapshot["startup_command"], "java -jar server.jar");
        assert_eq!(transport.call_count("GET", "/servers/abc123/startup"), 1);
    }

    #[test]
    fn failed_configuration_leaves_adapters_untouched() {
        let mut provider = Provider::new("test");
        let result = provider.configure(ProviderConfig {
            host: Some("not a url".into()),
            api_key: Some("ptla_key".into()),
            ..Default::default()
        });

        assert!(matches!(result, Err(PanelError::Config(_))));
        assert!(provider.resolved_config().is_none());
    }

    #[test]
    fn configure_returns_host_warning() {
        let mut provider = Provider::new("test");
        let warnings = provider
            .configure(ProviderConfig {
                host: Some("https://panel.example.com/".into()),
                api_key: Some("ptla_key".into()),
                use_application: Some(false),
                debug: Some(false),
            })
            .unwrap();

        assert_eq!(warnings.len(), 1);
        let resolved = provider.resolved_config().unwrap();
        assert_eq!(resolved.namespace, kineticpanel_domain::ApiNamespace::Client);
    }
}
