//! Server list query

use std::sync::Arc;

use async_trait::async_trait;
use kineticpanel_domain::{
    AttributeKind, AttributeSpec, Operation, PanelError, ResourceSchema, Result, ServersQuery,
    ServersSnapshot,
};
use tracing::debug;

use super::fetch;
use crate::codec::decode_server_list;
use crate::ports::{Adapter, QueryAdapter, Transport, TransportSlot};

pub const SERVERS_TYPE: &str = "kineticpanel_servers";

const SERVERS_ATTRIBUTES: &[AttributeSpec] = &[AttributeSpec::computed(
    "servers",
    AttributeKind::ObjectList,
    "Servers visible to the API key, in API order.",
)];

pub const SERVERS_SCHEMA: ResourceSchema = ResourceSchema {
    type_name: SERVERS_TYPE,
    description: "Lists every server the API key can access.",
    attributes: SERVERS_ATTRIBUTES,
    importable: false,
};

#[derive(Debug, Default)]
pub struct ServersQueryAdapter {
    transport: TransportSlot,
}

impl ServersQueryAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Adapter for ServersQueryAdapter {
    fn schema(&self) -> &'static ResourceSchema {
        &SERVERS_SCHEMA
    }

    fn configure(&mut self, transport: Arc<dyn Transport>) {
        self.transport.set(transport);
    }
}

#[async_trait]
impl QueryAdapter for ServersQueryAdapter {
    type Params = ServersQuery;
    type Snapshot = ServersSnapshot;

    async fn read(&self, _params: ServersQuery) -> Result<ServersSnapshot> {
        async {
            let body = fetch(&self.transport, SERVERS_TYPE, "/servers").await?;
            let servers = decode_server_list(&body)?;
            debug!(count = servers.len(), "listed servers");
            Ok(ServersSnapshot { servers })
        }
        .await
        .map_err(|err: PanelError| err.during(Operation::Query, SERVERS_TYPE))
    }
}
