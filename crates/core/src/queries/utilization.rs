//! Live resource usage query

use std::sync::Arc;

use async_trait::async_trait;
use kineticpanel_domain::{
    AttributeKind, AttributeSpec, Operation, ResourceSchema, Result, ServerQuery,
    UtilizationSnapshot,
};
use tracing::instrument;

use super::{fetch, server_path};
use crate::codec::decode_utilization;
use crate::ports::{Adapter, QueryAdapter, Transport, TransportSlot};

pub const UTILIZATION_TYPE: &str = "kineticpanel_server_utilization";

const UTILIZATION_ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::parameter("server_id", AttributeKind::String, "Short server identifier."),
    AttributeSpec::computed("state", AttributeKind::String, "Power state."),
    AttributeSpec::computed("cpu_percent", AttributeKind::Float, "CPU usage in percent."),
    AttributeSpec::computed("memory_bytes", AttributeKind::Int, "Memory usage in bytes."),
    AttributeSpec::computed("memory_mb", AttributeKind::Float, "Memory usage in MB."),
    AttributeSpec::computed("disk_bytes", AttributeKind::Int, "Disk usage in bytes."),
    AttributeSpec::computed("disk_mb", AttributeKind::Float, "Disk usage in MB."),
    AttributeSpec::computed("network_rx_bytes", AttributeKind::Int, "Bytes received."),
    AttributeSpec::computed("network_tx_bytes", AttributeKind::Int, "Bytes sent."),
    AttributeSpec::computed("uptime_seconds", AttributeKind::Int, "Uptime in seconds."),
];

pub const UTILIZATION_SCHEMA: ResourceSchema = ResourceSchema {
    type_name: UTILIZATION_TYPE,
    description: "Fetches live resource usage of a server.",
    attributes: UTILIZATION_ATTRIBUTES,
    importable: false,
};

#[derive(Debug, Default)]
pub struct UtilizationQueryAdapter {
    transport: TransportSlot,
}

impl UtilizationQueryAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Adapter for UtilizationQueryAdapter {
    fn schema(&self) -> &'static ResourceSchema {
        &UTILIZATION_SCHEMA
    }

    fn configure(&mut self, transport: Arc<dyn Transport>) {
        self.transport.set(transport);
    }
}

#[async_trait]
impl QueryAdapter for UtilizationQueryAdapter {
    type Params = ServerQuery;
    type Snapshot = UtilizationSnapshot;

    #[instrument(skip(self), fields(server_id = %params.server_id))]
    async fn read(&self, params: ServerQuery) -> Result<UtilizationSnapshot> {
        async {
            let path = server_path(&params.server_id, "/utilization")?;
            let body = fetch(&self.transport, UTILIZATION_TYPE, &path).await?;
            decode_utilization(&params.server_id, &body)
        }
        .await
        .map_err(|err| err.during(Operation::Query, UTILIZATION_TYPE))
    }
}
