//! Startup variable resource
//!
//! Import tokens have the form `<server_id>:<key>`.

use kineticpanel_domain::{
    split_import_token, validate_server_identifier, ActionKind, AttributeKind, AttributeSpec,
    ResourceSchema, Result, StartupVariableRecord, SyntheticId,
};
use serde_json::Value;

use super::action::{ActionResource, ServerAction};
use crate::codec::encode_startup_variable;

pub const STARTUP_VARIABLE_TYPE: &str = "kineticpanel_server_startup_variable";

const STARTUP_VARIABLE_ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::replace("server_id", AttributeKind::String, "Short server identifier."),
    AttributeSpec::replace(
        "key",
        AttributeKind::String,
        "Environment variable key (e.g. `MEMORYSIZE`, `SERVER_JAR`).",
    ),
    AttributeSpec::mutable("value", AttributeKind::String, "Value to set for the variable."),
    AttributeSpec::identity("id", AttributeKind::String, "Synthetic ID (`<server_id>-var-<key>`)."),
];

pub const STARTUP_VARIABLE_SCHEMA: ResourceSchema = ResourceSchema {
    type_name: STARTUP_VARIABLE_TYPE,
    description: "Sets one startup environment variable of a server.",
    attributes: STARTUP_VARIABLE_ATTRIBUTES,
    importable: true,
};

const IMPORT_FORMAT: &str = "<server_id>:<key>";

pub type StartupVariableResource = ActionResource<StartupVariableRecord>;

impl ServerAction for StartupVariableRecord {
    const SCHEMA: &'static ResourceSchema = &STARTUP_VARIABLE_SCHEMA;
    const ENDPOINT: &'static str = "startup/variable";

    fn server_id(&self) -> &str {
        &self.server_id
    }

    fn kind(&self) -> ActionKind {
        ActionKind::StartupVariable(self.key.clone())
    }

    fn payload(&self) -> Result<Value> {
        encode_startup_variable(self)
    }

    fn identity(&self) -> Option<&SyntheticId> {
        self.id.as_ref()
    }

    fn with_identity(mut self, id: SyntheticId) -> Self {
        self.id = Some(id);
        self
    }

    fn from_import_token(token: &str) -> Result<Self> {
        let parts = split_import_token(token, 2, IMPORT_FORMAT)?;
        validate_server_identifier(parts[0])?;
        Ok(Self { server_id: parts[0].to_string(), key: parts[1].to_string(), value: None, id: None })
    }
}
