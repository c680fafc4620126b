//! Power signal resource

use kineticpanel_domain::{
    validate_server_identifier, ActionKind, AttributeKind, AttributeSpec, PowerRecord,
    ResourceSchema, Result, SyntheticId,
};
use serde_json::Value;

use super::action::{ActionResource, ServerAction};
use crate::codec::encode_power;

pub const POWER_TYPE: &str = "kineticpanel_server_power";

const POWER_ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::replace("server_id", AttributeKind::String, "Short server identifier."),
    AttributeSpec::mutable(
        "signal",
        AttributeKind::String,
        "Power signal: start, stop, restart or kill.",
    ),
    AttributeSpec::identity("id", AttributeKind::String, "Synthetic ID (`<server_id>-power`)."),
];

pub const POWER_SCHEMA: ResourceSchema = ResourceSchema {
    type_name: POWER_TYPE,
    description: "Sends a power signal to a server.",
    attributes: POWER_ATTRIBUTES,
    importable: true,
};

pub type PowerResource = ActionResource<PowerRecord>;

impl ServerAction for PowerRecord {
    const SCHEMA: &'static ResourceSchema = &POWER_SCHEMA;
    const ENDPOINT: &'static str = "power";

    fn server_id(&self) -> &str {
        &self.server_id
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Power
    }

    fn payload(&self) -> Result<Value> {
        encode_power(self)
    }

    fn identity(&self) -> Option<&SyntheticId> {
        self.id.as_ref()
    }

    fn with_identity(mut self, id: SyntheticId) -> Self {
        self.id = Some(id);
        self
    }

    fn from_import_token(token: &str) -> Result<Self> {
        validate_server_identifier(token)?;
        Ok(Self { server_id: token.to_string(), signal: None, id: None })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kineticpanel_domain::{PanelError, PowerSignal};
    use serde_json::json;

    use super::*;
    use crate::ports::{Adapter, ReadOutcome, ResourceAdapter};
    use crate::testing::{MockReply, MockTransport};

    fn configured(transport: &MockTransport) -> PowerResource {
        let mut resource = PowerResource::new();
        resource.configure(Arc::new(transport.clone()));
        resource
    }

    fn record(signal: PowerSignal) -> PowerRecord {
        PowerRecord { server_id: "1a2b3c4d".into(), signal: Some(signal), id: None }
    }

    #[tokio::test]
    async fn create_sends_signal_and_synthesizes_id() {
        let transport = MockTransport::new();
        transport.on("POST", "/servers/1a2b3c4d/power", MockReply::empty());
        let resource = configured(&transport);

        let created = resource.create(record(PowerSignal::Start)).await.unwrap();
        assert_eq!(created.id.unwrap().as_str(), "1a2b3c4d-power");
        assert_eq!(transport.last_call().unwrap().body, Some(json!({"signal": "start"})));
    }

    #[tokio::test]
    async fn update_resubmits_and_keeps_identity() {
        let transport = MockTransport::new();
        transport.on("POST", "/servers/1a2b3c4d/power", MockReply::empty());
        let resource = configured(&transport);

        let prior = resource.create(record(PowerSignal::Start)).await.unwrap();
        let updated = resource.update(&prior, record(PowerSignal::Restart)).await.unwrap();

        assert_eq!(updated.id, prior.id);
        assert_eq!(updated.signal, Some(PowerSignal::Restart));
        assert_eq!(transport.call_count("POST", "/servers/1a2b3c4d/power"), 2);
    }

    #[tokio::test]
    async fn read_and_delete_touch_nothing_remote() {
        let transport = MockTransport::new();
        let resource = configured(&transport);
        let current = record(PowerSignal::Stop);

        let outcome = resource.read(current.clone()).await.unwrap();
        assert_eq!(outcome, ReadOutcome::Present(current.clone()));
        resource.delete(&current).await.unwrap();
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn api_failure_is_labelled_create_error() {
        let transport = MockTransport::new();
        transport.on("POST", "/servers/1a2b3c4d/power", MockReply::status(409, "conflict"));
        let resource = configured(&transport);

        let err = resource.create(record(PowerSignal::Kill)).await.unwrap_err();
        assert_eq!(err.summary(), "API Create Error");
        assert_eq!(err.status(), Some(409));
    }

    #[tokio::test]
    async fn import_uses_token_as_server_id() {
        let resource = configured(&MockTransport::new());

        let imported = resource.import("1a2b3c4d").await.unwrap();
        assert_eq!(imported.server_id, "1a2b3c4d");
        assert_eq!(imported.signal, None);
        assert_eq!(imported.id.unwrap().as_str(), "1a2b3c4d-power");

        let err = resource.import("bad id").await.unwrap_err();
        assert!(matches!(err, PanelError::Operation { .. }));
    }
}
