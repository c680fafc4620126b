//! Console command resource

use kineticpanel_domain::{
    ActionKind, AttributeKind, AttributeSpec, CommandRecord, ResourceSchema, Result, SyntheticId,
};
use serde_json::Value;

use super::action::{ActionResource, ServerAction};
use crate::codec::encode_command;

pub const COMMAND_TYPE: &str = "kineticpanel_server_command";

const COMMAND_ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::replace("server_id", AttributeKind::String, "Short server identifier."),
    AttributeSpec::mutable("command", AttributeKind::String, "Command sent to the console."),
    AttributeSpec::identity("id", AttributeKind::String, "Synthetic ID (`<server_id>-cmd`)."),
];

pub const COMMAND_SCHEMA: ResourceSchema = ResourceSchema {
    type_name: COMMAND_TYPE,
    description: "Sends a command to a server console.",
    attributes: COMMAND_ATTRIBUTES,
    importable: false,
};

pub type CommandResource = ActionResource<CommandRecord>;

impl ServerAction for CommandRecord {
    const SCHEMA: &'static ResourceSchema = &COMMAND_SCHEMA;
    const ENDPOINT: &'static str = "command";

    fn server_id(&self) -> &str {
        &self.server_id
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Command
    }

    fn payload(&self) -> Result<Value> {
        encode_command(self)
    }

    fn identity(&self) -> Option<&SyntheticId> {
        self.id.as_ref()
    }

    fn with_identity(mut self, id: SyntheticId) -> Self {
        self.id = Some(id);
        self
    }
}
