//! Codec for the managed server record (administrative API)

use kineticpanel_domain::{PanelError, Result, ServerRecord};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{envelope, parse_value};

#[derive(Debug, Default, Deserialize)]
struct WireServer {
    id: Option<i64>,
    name: Option<String>,
    user: Option<i64>,
    egg: Option<i64>,
    location: Option<i64>,
    node: Option<i64>,
    memory: Option<i64>,
    disk: Option<i64>,
    cpu: Option<i64>,
    docker_image: Option<String>,
    startup: Option<String>,
    limits: Option<WireLimits>,
    container: Option<WireContainer>,
}

#[derive(Debug, Default, Deserialize)]
struct WireLimits {
    memory: Option<i64>,
    disk: Option<i64>,
    cpu: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct WireContainer {
    image: Option<String>,
    startup_command: Option<String>,
}

/// Decode a server response into a managed record.
///
/// Flat fields win over the `limits` / `container` nesting. Only the `id`
/// may be taken from `known`, the record the caller already holds, since
/// some responses omit it. Every other field must be present in the body.
///
/// # Errors
/// Returns `PanelError::Decode` for malformed JSON or a missing field.
pub fn decode_server(body: &[u8], known: Option<&ServerRecord>) -> Result<ServerRecord> {
    let value = envelope::unwrap_attributes(parse_value(body)?);
    let wire: WireServer = serde_json::from_value(value)?;
    let limits = wire.limits.unwrap_or_default();
    let container = wire.container.unwrap_or_default();

    let id = required("id", wire.id.or_else(|| known.and_then(|k| k.id)))?;

    Ok(ServerRecord {
        id: Some(id),
        name: required("name", wire.name)?,
        user_id: required("user", wire.user)?,
        egg_id: required("egg", wire.egg)?,
        location_id: required("location", wire.location)?,
        node_id: required("node", wire.node)?,
        memory: required("memory", wire.memory.or(limits.memory))?,
        disk: required("disk", wire.disk.or(limits.disk))?,
        cpu: required("cpu", wire.cpu.or(limits.cpu))?,
        docker_image: required("docker_image", wire.docker_image.or(container.image))?,
        startup_command: required("startup", wire.startup.or(container.startup_command))?,
    })
}

/// Create/update payload for a server.
pub fn encode_server(record: &ServerRecord) -> Value {
    json!({
        "name": record.name,
        "user": record.user_id,
        "egg": record.egg_id,
        "location": record.location_id,
        "node": record.node_id,
        "memory": record.memory,
        "disk": record.disk,
        "cpu": record.cpu,
        "docker_image": record.docker_image,
        "startup": record.startup_command,
    })
}

fn required<T>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| PanelError::Decode(format!("server response is missing `{field}`")))
}
