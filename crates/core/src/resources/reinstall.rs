//! Server reinstall resource

use kineticpanel_domain::{
    ActionKind, AttributeKind, AttributeSpec, ReinstallRecord, ResourceSchema, Result, SyntheticId,
};
use serde_json::Value;

use super::action::{ActionResource, ServerAction};
use crate::codec::encode_reinstall;

pub const REINSTALL_TYPE: &str = "kineticpanel_server_reinstall";

const REINSTALL_ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::replace("server_id", AttributeKind::String, "Short server identifier."),
    AttributeSpec::mutable("force", AttributeKind::Bool, "Reinstall even if the server is running.")
        .optional(),
    AttributeSpec::identity("id", AttributeKind::String, "Synthetic ID (`<server_id>-reinstall`)."),
];

pub const REINSTALL_SCHEMA: ResourceSchema = ResourceSchema {
    type_name: REINSTALL_TYPE,
    description: "Reinstalls a server. Wipes server files and redeploys the egg.",
    attributes: REINSTALL_ATTRIBUTES,
    importable: false,
};

pub type ReinstallResource = ActionResource<ReinstallRecord>;

impl ServerAction for ReinstallRecord {
    const SCHEMA: &'static ResourceSchema = &REINSTALL_SCHEMA;
    const ENDPOINT: &'static str = "settings/reinstall";

    fn server_id(&self) -> &str {
        &self.server_id
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Reinstall
    }

    fn payload(&self) -> Result<Value> {
        encode_reinstall(self)
    }

    fn identity(&self) -> Option<&SyntheticId> {
        self.id.as_ref()
    }

    fn with_identity(mut self, id: SyntheticId) -> Self {
        self.id = Some(id);
        self
    }
}
