//! Single server query

use std::sync::Arc;

use async_trait::async_trait;
use kineticpanel_domain::{
    AttributeKind, AttributeSpec, Operation, ResourceSchema, Result, ServerQuery, ServerSnapshot,
};
use tracing::instrument;

use super::{fetch, server_path};
use crate::codec::decode_server_snapshot;
use crate::ports::{Adapter, QueryAdapter, Transport, TransportSlot};

pub const SERVER_QUERY_TYPE: &str = "kineticpanel_server";

const SERVER_QUERY_ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::parameter("server_id", AttributeKind::String, "Short server identifier."),
    AttributeSpec::computed("id", AttributeKind::String, "Same as identifier."),
    AttributeSpec::computed("identifier", AttributeKind::String, "Short identifier."),
    AttributeSpec::computed("internal_id", AttributeKind::Int, "Numeric internal ID."),
    AttributeSpec::computed("uuid", AttributeKind::String, "Full UUID."),
    AttributeSpec::computed("name", AttributeKind::String, "Server name."),
    AttributeSpec::computed("description", AttributeKind::String, "Server description."),
    AttributeSpec::computed("is_suspended", AttributeKind::Bool, "Whether suspended."),
    AttributeSpec::computed("is_installing", AttributeKind::Bool, "Whether installing."),
    AttributeSpec::computed("is_transferring", AttributeKind::Bool, "Whether transferring."),
    AttributeSpec::computed("node", AttributeKind::String, "Node name."),
    AttributeSpec::computed("sftp_ip", AttributeKind::String, "SFTP host."),
    AttributeSpec::computed("sftp_port", AttributeKind::Int, "SFTP port."),
    AttributeSpec::computed("invocation", AttributeKind::String, "Resolved startup command."),
    AttributeSpec::computed("docker_image", AttributeKind::String, "Container image."),
    AttributeSpec::computed("limits", AttributeKind::Object, "Memory, swap, disk, IO and CPU."),
    AttributeSpec::computed("allocation", AttributeKind::Object, "Default allocation."),
    AttributeSpec::computed("environment", AttributeKind::StringMap, "Startup variables."),
    AttributeSpec::computed("egg_features", AttributeKind::StringList, "Enabled egg features."),
    AttributeSpec::computed("feature_limits", AttributeKind::Object, "Feature limits."),
    AttributeSpec::computed("user_permissions", AttributeKind::StringList, "User permissions."),
];

pub const SERVER_QUERY_SCHEMA: ResourceSchema = ResourceSchema {
    type_name: SERVER_QUERY_TYPE,
    description: "Fetches detailed information about one server.",
    attributes: SERVER_QUERY_ATTRIBUTES,
    importable: false,
};

#[derive(Debug, Default)]
pub struct ServerQueryAdapter {
    transport: TransportSlot,
}

impl ServerQueryAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Adapter for ServerQueryAdapter {
    fn schema(&self) -> &'static ResourceSchema {
        &SERVER_QUERY_SCHEMA
    }

    fn configure(&mut self, transport: Arc<dyn Transport>) {
        self.transport.set(transport);
    }
}

#[async_trait]
impl QueryAdapter for ServerQueryAdapter {
    type Params = ServerQuery;
    type Snapshot = ServerSnapshot;

    #[instrument(skip(self), fields(server_id = %params.server_id))]
    async fn read(&self, params: ServerQuery) -> Result<ServerSnapshot> {
        async {
            let path = server_path(&params.server_id, "")?;
            let body = fetch(&self.transport, SERVER_QUERY_TYPE, &path).await?;
            decode_server_snapshot(&params.server_id, &body)
        }
        .await
        .map_err(|err| err.during(Operation::Query, SERVER_QUERY_TYPE))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{MockReply, MockTransport};

    #[tokio::test]
    async fn reads_server_detail() {
        let transport = MockTransport::new();
        transport.on("GET", "/servers/1a2b3c4d", MockReply::json(json!({"attributes": {
            "identifier": "1a2b3c4d", "internal_id": 4, "name": "lobby",
            "egg_features": ["eula"]
        }})));
        let mut adapter = ServerQueryAdapter::new();
        adapter.configure(Arc::new(transport));

        let snapshot =
            adapter.read(ServerQuery { server_id: "1a2b3c4d".into() }).await.unwrap();
        assert_eq!(snapshot.internal_id, 4);
        assert_eq!(snapshot.egg_features, Some(vec!["eula".to_string()]));
    }

    #[tokio::test]
    async fn missing_server_is_a_query_error() {
        let transport = MockTransport::new();
        transport.on("GET", "/servers/gone", MockReply::status(404, "{}"));
        let mut adapter = ServerQueryAdapter::new();
        adapter.configure(Arc::new(transport));

        let err = adapter.read(ServerQuery { server_id: "gone".into() }).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.summary(), "API Query Error");
    }
}
