//! Server rename resource

use kineticpanel_domain::{
    validate_server_identifier, ActionKind, AttributeKind, AttributeSpec, RenameRecord,
    ResourceSchema, Result, SyntheticId,
};
use serde_json::Value;

use super::action::{ActionResource, ServerAction};
use crate::codec::encode_rename;

pub const RENAME_TYPE: &str = "kineticpanel_server_rename";

const RENAME_ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::replace("server_id", AttributeKind::String, "Short server identifier."),
    AttributeSpec::mutable("name", AttributeKind::String, "New server name."),
    AttributeSpec::mutable("description", AttributeKind::String, "New server description.")
        .optional(),
    AttributeSpec::identity("id", AttributeKind::String, "Synthetic ID (`<server_id>-rename`)."),
];

pub const RENAME_SCHEMA: ResourceSchema = ResourceSchema {
    type_name: RENAME_TYPE,
    description: "Renames a server and optionally sets its description.",
    attributes: RENAME_ATTRIBUTES,
    importable: true,
};

pub type RenameResource = ActionResource<RenameRecord>;

impl ServerAction for RenameRecord {
    const SCHEMA: &'static ResourceSchema = &RENAME_SCHEMA;
    const ENDPOINT: &'static str = "settings/rename";

    fn server_id(&self) -> &str {
        &self.server_id
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Rename
    }

    fn payload(&self) -> Result<Value> {
        encode_rename(self)
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
        Ok(Self { server_id: token.to_string(), name: None, description: None, id: None })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::ports::{Adapter, ResourceAdapter};
    use crate::testing::{MockReply, MockTransport};

    #[tokio::test]
    async fn rename_sends_only_rename_fields() {
        let transport = MockTransport::new();
        transport.on("POST", "/servers/abc123/settings/rename", MockReply::empty());
        let mut resource = RenameResource::new();
        resource.configure(Arc::new(transport.clone()));

        let record = RenameRecord {
            server_id: "abc123".into(),
            name: Some("Lobby".into()),
            description: None,
            id: None,
        };
        let created = resource.create(record).await.unwrap();

        assert_eq!(created.id.unwrap().as_str(), "abc123-rename");
        assert_eq!(transport.last_call().unwrap().body, Some(json!({"name": "Lobby"})));
    }

    #[tokio::test]
    async fn import_leaves_name_unset() {
        let resource = RenameResource::new();
        let imported = resource.import("abc123").await.unwrap();
        assert_eq!(imported.name, None);
        assert_eq!(imported.id.unwrap().as_str(), "abc123-rename");
    }
}
