//! Recent console output query

use std::sync::Arc;

use async_trait::async_trait;
use kineticpanel_domain::constants::{DEFAULT_LOG_LINES, MAX_LOG_LINES};
use kineticpanel_domain::{
    ActivityLogsQuery, ActivityLogsSnapshot, AttributeKind, AttributeSpec, Operation, PanelError,
    ResourceSchema, Result,
};
use tracing::{debug, instrument};
use url::form_urlencoded;

use super::{fetch, server_path};
use crate::codec::decode_console_entries;
use crate::console::clean_console_output;
use crate::ports::{Adapter, QueryAdapter, Transport, TransportSlot};

pub const ACTIVITY_LOGS_TYPE: &str = "kineticpanel_server_activity_logs";

const ACTIVITY_LOGS_ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::parameter("server_id", AttributeKind::String, "Short server identifier."),
    AttributeSpec::parameter("lines", AttributeKind::Int, "Number of lines (default 50, max 100).")
        .optional(),
    AttributeSpec::computed("logs", AttributeKind::StringList, "Console lines, newest first."),
    AttributeSpec::computed("timestamps", AttributeKind::StringList, "Timestamp of each line."),
];

pub const ACTIVITY_LOGS_SCHEMA: ResourceSchema = ResourceSchema {
    type_name: ACTIVITY_LOGS_TYPE,
    description: "Fetches recent console output of a server.",
    attributes: ACTIVITY_LOGS_ATTRIBUTES,
    importable: false,
};

/// Requested line count: unset or zero means the default, capped at the
/// maximum.
pub fn effective_lines(requested: Option<u32>) -> u32 {
    match requested {
        None | Some(0) => DEFAULT_LOG_LINES,
        Some(n) => n.min(MAX_LOG_LINES),
    }
}

#[derive(Debug, Default)]
pub struct ActivityLogsQueryAdapter {
    transport: TransportSlot,
}

impl ActivityLogsQueryAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Adapter for ActivityLogsQueryAdapter {
    fn schema(&self) -> &'static ResourceSchema {
        &ACTIVITY_LOGS_SCHEMA
    }

    fn configure(&mut self, transport: Arc<dyn Transport>) {
        self.transport.set(transport);
    }
}

#[async_trait]
impl QueryAdapter for ActivityLogsQueryAdapter {
    type Params = ActivityLogsQuery;
    type Snapshot = ActivityLogsSnapshot;

    #[instrument(skip(self), fields(server_id = %params.server_id))]
    async fn read(&self, params: ActivityLogsQuery) -> Result<ActivityLogsSnapshot> {
        async {
            let lines = effective_lines(params.lines);
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("logs", &lines.to_string())
                .finish();
            let path = server_path(&params.server_id, &format!("/websocket?{query}"))?;

            let body = fetch(&self.transport, ACTIVITY_LOGS_TYPE, &path).await?;
            let cleaned = clean_console_output(decode_console_entries(&body)?);
            debug!(lines, kept = cleaned.logs.len(), "console output fetched");

            Ok(ActivityLogsSnapshot {
                server_id: params.server_id.clone(),
                lines,
                logs: cleaned.logs,
                timestamps: cleaned.timestamps,
            })
        }
        .await
        .map_err(|err: PanelError| err.during(Operation::Query, ACTIVITY_LOGS_TYPE))
    }
}
