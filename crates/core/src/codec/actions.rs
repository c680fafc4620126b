//! Per-operation payload encoders for action-style resources
//!
//! Each payload carries only the fields its endpoint accepts.

use kineticpanel_domain::{
    CommandRecord, DockerImageRecord, PanelError, PowerRecord, ReinstallRecord, RenameRecord,
    Result, StartupVariableRecord,
};
use serde_json::{json, Map, Value};

pub fn encode_power(record: &PowerRecord) -> Result<Value> {
    let signal = record.signal.ok_or_else(|| missing("signal"))?;
    Ok(json!({ "signal": signal.as_str() }))
}

pub fn encode_command(record: &CommandRecord) -> Result<Value> {
    if record.command.is_empty() {
        return Err(missing("command"));
    }
    Ok(json!({ "command": record.command }))
}

/// `description` is sent only when set.
pub fn encode_rename(record: &RenameRecord) -> Result<Value> {
    let name = record.name.as_deref().ok_or_else(|| missing("name"))?;
    let mut payload = Map::new();
    payload.insert("name".into(), Value::from(name));
    if let Some(description) = &record.description {
        payload.insert("description".into(), Value::from(description.as_str()));
    }
    Ok(Value::Object(payload))
}

/// An unset `force` produces an empty object.
pub fn encode_reinstall(record: &ReinstallRecord) -> Result<Value> {
    let mut payload = Map::new();
    if let Some(force) = record.force {
        payload.insert("force".into(), Value::Bool(force));
    }
    Ok(Value::Object(payload))
}

pub fn encode_docker_image(record: &DockerImageRecord) -> Result<Value> {
    let image = record.docker_image.as_deref().ok_or_else(|| missing("docker_image"))?;
    Ok(json!({ "docker_image": image }))
}

pub fn encode_startup_variable(record: &StartupVariableRecord) -> Result<Value> {
    let value = record.value.as_deref().ok_or_else(|| missing("value"))?;
    Ok(json!({ "key": record.key, "value": value }))
}

fn missing(field: &str) -> PanelError {
    PanelError::InvalidInput(format!("`{field}` must be set"))
}
