//! Docker image resource

use kineticpanel_domain::{
    validate_server_identifier, ActionKind, AttributeKind, AttributeSpec, DockerImageRecord,
    ResourceSchema, Result, SyntheticId,
};
use serde_json::Value;

use super::action::{ActionResource, ServerAction};
use crate::codec::encode_docker_image;

pub const DOCKER_IMAGE_TYPE: &str = "kineticpanel_server_docker_image";

const DOCKER_IMAGE_ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::replace("server_id", AttributeKind::String, "Short server identifier."),
    AttributeSpec::mutable("docker_image", AttributeKind::String, "Container image to run."),
    AttributeSpec::identity("id", AttributeKind::String, "Synthetic ID (`<server_id>-docker`)."),
];

pub const DOCKER_IMAGE_SCHEMA: ResourceSchema = ResourceSchema {
    type_name: DOCKER_IMAGE_TYPE,
    description: "Changes the container image of a server.",
    attributes: DOCKER_IMAGE_ATTRIBUTES,
    importable: true,
};

pub type DockerImageResource = ActionResource<DockerImageRecord>;

impl ServerAction for DockerImageRecord {
    const SCHEMA: &'static ResourceSchema = &DOCKER_IMAGE_SCHEMA;
    const ENDPOINT: &'static str = "settings/docker-image";

    fn server_id(&self) -> &str {
        &self.server_id
    }

    fn kind(&self) -> ActionKind {
        ActionKind::DockerImage
    }

    fn payload(&self) -> Result<Value> {
        encode_docker_image(self)
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
        Ok(Self { server_id: token.to_string(), docker_image: None, id: None })
    }
}
