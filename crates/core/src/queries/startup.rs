//! Startup configuration query

use std::sync::Arc;

use async_trait::async_trait;
use kineticpanel_domain::{
    AttributeKind, AttributeSpec, Operation, ResourceSchema, Result, ServerQuery, StartupSnapshot,
};

use super::{fetch, server_path};
use crate::codec::decode_startup;
use crate::ports::{Adapter, QueryAdapter, Transport, TransportSlot};

pub const STARTUP_TYPE: &str = "kineticpanel_server_startup";

const STARTUP_ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::parameter("server_id", AttributeKind::String, "Short server identifier."),
    AttributeSpec::computed("startup_command", AttributeKind::String, "Startup command."),
    AttributeSpec::computed("egg_id", AttributeKind::Int, "Egg ID."),
    AttributeSpec::computed("docker_image", AttributeKind::String, "Container image."),
    AttributeSpec::computed("environment", AttributeKind::StringMap, "Startup variables."),
];

pub const STARTUP_SCHEMA: ResourceSchema = ResourceSchema {
    type_name: STARTUP_TYPE,
    description: "Fetches the startup configuration of a server.",
    attributes: STARTUP_ATTRIBUTES,
    importable: false,
};

#[derive(Debug, Default)]
pub struct StartupQueryAdapter {
    transport: TransportSlot,
}

impl StartupQueryAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Adapter for StartupQueryAdapter {
    fn schema(&self) -> &'static ResourceSchema {
        &STARTUP_SCHEMA
    }

    fn configure(&mut self, transport: Arc<dyn Transport>) {
        self.transport.set(transport);
    }
}

#[async_trait]
impl QueryAdapter for StartupQueryAdapter {
    type Params = ServerQuery;
    type Snapshot = StartupSnapshot;

    async fn read(&self, params: ServerQuery) -> Result<StartupSnapshot> {
        async {
            let path = server_path(&params.server_id, "/startup")?;
            let body = fetch(&self.transport, STARTUP_TYPE, &path).await?;
            decode_startup(&params.server_id, &body)
        }
        .await
        .map_err(|err| err.during(Operation::Query, STARTUP_TYPE))
    }
}
