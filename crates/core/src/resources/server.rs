//! Managed server resource (administrative API)

use std::sync::Arc;

use async_trait::async_trait;
use kineticpanel_domain::{
    split_import_token, AttributeKind, AttributeSpec, Operation, PanelError, ResourceSchema,
    Result, ServerRecord,
};
use tracing::{debug, info, instrument};

use crate::codec::{decode_server, encode_server};
use crate::ports::{Adapter, ReadOutcome, ResourceAdapter, Transport, TransportSlot};

pub const SERVER_TYPE: &str = "kineticpanel_server";

const SERVER_ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::identity("id", AttributeKind::Int, "Numeric internal ID of the server."),
    AttributeSpec::mutable("name", AttributeKind::String, "Display name of the server."),
    AttributeSpec::replace("user_id", AttributeKind::Int, "ID of the owning user."),
    AttributeSpec::replace("egg_id", AttributeKind::Int, "ID of the egg the server runs."),
    AttributeSpec::replace("location_id", AttributeKind::Int, "ID of the deployment location."),
    AttributeSpec::replace("node_id", AttributeKind::Int, "ID of the node hosting the server."),
    AttributeSpec::mutable("memory", AttributeKind::Int, "Memory limit in MB."),
    AttributeSpec::mutable("disk", AttributeKind::Int, "Disk limit in MB."),
    AttributeSpec::mutable("cpu", AttributeKind::Int, "CPU limit in percent."),
    AttributeSpec::mutable("docker_image", AttributeKind::String, "Container image."),
    AttributeSpec::mutable("startup_command", AttributeKind::String, "Startup command."),
];

pub const SERVER_SCHEMA: ResourceSchema = ResourceSchema {
    type_name: SERVER_TYPE,
    description: "Creates and manages a server through the administrative API.",
    attributes: SERVER_ATTRIBUTES,
    importable: true,
};

/// Full lifecycle of a server: create, read, patch, delete
#[derive(Debug, Default)]
pub struct ServerResource {
    transport: TransportSlot,
}

impl ServerResource {
    pub fn new() -> Self {
        Self::default()
    }

    fn transport(&self) -> Result<&Arc<dyn Transport>> {
        self.transport.get(SERVER_TYPE)
    }

    async fn fetch(&self, id: i64, known: Option<&ServerRecord>) -> Result<ServerRecord> {
        let body = self.transport()?.get(&server_path(id)).await?;
        decode_server(&body, known)
    }
}

impl Adapter for ServerResource {
    fn schema(&self) -> &'static ResourceSchema {
        &SERVER_SCHEMA
    }

    fn configure(&mut self, transport: Arc<dyn Transport>) {
        self.transport.set(transport);
    }
}

#[async_trait]
impl ResourceAdapter for ServerResource {
    type Record = ServerRecord;

    #[instrument(skip(self, desired), fields(name = %desired.name))]
    async fn create(&self, desired: ServerRecord) -> Result<ServerRecord> {
        async {
            let body = self.transport()?.post("/servers", Some(&encode_server(&desired))).await?;
            decode_server(&body, Some(&desired))
                .inspect(|created| info!(id = ?created.id, "server created"))
        }
        .await
        .map_err(|err| err.during(Operation::Create, SERVER_TYPE))
    }

    #[instrument(skip(self, current), fields(id = ?current.id))]
    async fn read(&self, current: ServerRecord) -> Result<ReadOutcome<ServerRecord>> {
        let result = async {
            let id = require_id(&current)?;
            self.fetch(id, Some(&current)).await
        }
        .await;

        match result {
            Ok(record) => Ok(ReadOutcome::Present(record)),
            Err(err) if err.is_not_found() => {
                info!("server no longer exists, dropping from state");
                Ok(ReadOutcome::Gone)
            }
            Err(err) => Err(err.during(Operation::Read, SERVER_TYPE)),
        }
    }

    #[instrument(skip(self, prior, desired), fields(id = ?prior.id))]
    async fn update(&self, prior: &ServerRecord, desired: ServerRecord) -> Result<ServerRecord> {
        async {
            let desired = desired.with_identity_of(prior);
            let id = require_id(&desired)?;
            self.transport()?.patch(&server_path(id), &encode_server(&desired)).await?;
            debug!("server patched, refreshing");
            self.fetch(id, Some(&desired)).await
        }
        .await
        .map_err(|err| err.during(Operation::Update, SERVER_TYPE))
    }

    #[instrument(skip(self, current), fields(id = ?current.id))]
    async fn delete(&self, current: &ServerRecord) -> Result<()> {
        let result = async {
            let id = require_id(current)?;
            self.transport()?.delete(&server_path(id)).await
        }
        .await;

        match result {
            Err(err) if err.is_not_found() => {
                debug!("server already gone");
                Ok(())
            }
            other => other.map_err(|err| err.during(Operation::Delete, SERVER_TYPE)),
        }
    }

    #[instrument(skip(self))]
    async fn import(&self, token: &str) -> Result<ServerRecord> {
        async {
            let raw = split_import_token(token, 1, "<numeric server id>")?[0];
            let id: i64 = raw.parse().map_err(|_| {
                PanelError::Import(format!(
                    "Invalid Import ID {token:?}. Expected format: <numeric server id>"
                ))
            })?;
            self.fetch(id, None).await
        }
        .await
        .map_err(|err| err.during(Operation::Import, SERVER_TYPE))
    }
}

fn server_path(id: i64) -> String {
    format!("/servers/{id}")
}

fn require_id(record: &ServerRecord) -> Result<i64> {
    record.id.ok_or_else(|| PanelError::InvalidInput("server record has no `id`".into()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{MockReply, MockTransport};

    fn desired() -> ServerRecord {
        ServerRecord {
            id: None,
            name: "survival".into(),
            user_id: 1,
            egg_id: 5,
            location_id: 2,
            node_id: 3,
            memory: 4096,
            disk: 20480,
            cpu: 200,
            docker_image: "ghcr.io/pterodactyl/yolks:java_17".into(),
            startup_command: "java -jar server.jar".into(),
        }
    }

    fn response(id: i64, name: &str) -> serde_json::Value {
        json!({"object": "server", "attributes": {
            "id": id, "name": name, "user": 1, "egg": 5, "location": 2, "node": 3,
            "memory": 4096, "disk": 20480, "cpu": 200,
            "docker_image": "ghcr.io/pterodactyl/yolks:java_17",
            "startup": "java -jar server.jar"
        }})
    }

    fn configured(transport: &MockTransport) -> ServerResource {
        let mut resource = ServerResource::new();
        resource.configure(Arc::new(transport.clone()));
        resource
    }

    #[tokio::test]
    async fn create_posts_full_payload_and_assigns_id() {
        let transport = MockTransport::new();
        transport.on("POST", "/servers", MockReply::json(response(42, "survival")));
        let resource = configured(&transport);

        let created = resource.create(desired()).await.unwrap();
        assert_eq!(created.id, Some(42));

        let call = transport.last_call().unwrap();
        let body = call.body.unwrap();
        assert_eq!(body["user"], 1);
        assert_eq!(body["startup"], "java -jar server.jar");
        assert!(body.get("id").is_none());
    }

    #[tokio::test]
    async fn read_signals_gone_on_404_only() {
        let transport = MockTransport::new();
        transport.on("GET", "/servers/42", MockReply::status(404, r#"{"errors":[]}"#));
        let resource = configured(&transport);
        let current = ServerRecord { id: Some(42), ..desired() };

        assert_eq!(resource.read(current.clone()).await.unwrap(), ReadOutcome::Gone);

        transport.on("GET", "/servers/42", MockReply::status(500, "error 404 upstream"));
        let err = resource.read(current).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().starts_with("read kineticpanel_server failed"));
    }

    #[tokio::test]
    async fn read_of_incomplete_response_is_a_decode_failure() {
        let transport = MockTransport::new();
        transport.on("GET", "/servers/42", MockReply::json(json!({"attributes": {"id": 42, "name": "x"}})));
        let resource = configured(&transport);
        let current = ServerRecord { id: Some(42), ..desired() };

        let err = resource.read(current).await.unwrap_err();
        assert_eq!(err.category(), kineticpanel_domain::ErrorCategory::Decode);
        assert!(err.to_string().starts_with("read kineticpanel_server failed"));
    }

    #[tokio::test]
    async fn update_patches_then_refreshes_keeping_identity() {
        let transport = MockTransport::new();
        transport
            .on("PATCH", "/servers/42", MockReply::empty())
            .on("GET", "/servers/42", MockReply::json(response(42, "renamed")));
        let resource = configured(&transport);
        let prior = ServerRecord { id: Some(42), ..desired() };
        let wanted = ServerRecord { name: "renamed".into(), ..desired() };

        let updated = resource.update(&prior, wanted).await.unwrap();
        assert_eq!(updated.id, Some(42));
        assert_eq!(updated.name, "renamed");
        assert_eq!(transport.call_count("PATCH", "/servers/42"), 1);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let transport = MockTransport::new();
        transport.on("DELETE", "/servers/42", MockReply::status(404, "{}"));
        let resource = configured(&transport);

        resource.delete(&ServerRecord { id: Some(42), ..desired() }).await.unwrap();

        transport.on("DELETE", "/servers/42", MockReply::status(409, "conflict"));
        let err = resource.delete(&ServerRecord { id: Some(42), ..desired() }).await.unwrap_err();
        assert_eq!(err.summary(), "API Delete Error");
    }

    #[tokio::test]
    async fn import_parses_numeric_id() {
        let transport = MockTransport::new();
        transport.on("GET", "/servers/7", MockReply::json(response(7, "imported")));
        let resource = configured(&transport);

        let record = resource.import("7").await.unwrap();
        assert_eq!(record.id, Some(7));
        assert_eq!(record.name, "imported");

        let err = resource.import("abc").await.unwrap_err();
        assert_eq!(err.category(), kineticpanel_domain::ErrorCategory::Input);
    }

    #[tokio::test]
    async fn unconfigured_adapter_refuses_to_run() {
        let resource = ServerResource::new();
        let err = resource.create(desired()).await.unwrap_err();
        assert!(err.to_string().contains("used before the provider configured it"));
    }

    #[test]
    fn owner_egg_node_and_location_force_replacement() {
        let fields: Vec<_> = SERVER_SCHEMA.replacement_fields().collect();
        assert_eq!(fields, vec!["user_id", "egg_id", "location_id", "node_id"]);
    }
}
