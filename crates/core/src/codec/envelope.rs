//! API envelope handling
//!
//! Single entities arrive as `{"object": "...", "attributes": {...}}` and
//! collections as `{"object": "list", "data": [{"attributes": {...}}]}`.
//! Some endpoints answer with the bare object or array instead.

use kineticpanel_domain::{PanelError, Result};
use serde_json::Value;

/// Extract the entity object from a single-entity envelope.
///
/// A body without an `attributes` object is returned unchanged.
pub fn unwrap_attributes(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.get("attributes").is_some_and(Value::is_object) => {
            map.remove("attributes").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Extract the entity objects of a collection, preserving API order.
///
/// # Errors
/// Returns `PanelError::Decode` if the body is neither a `data` envelope
/// nor a bare array.
pub fn collection(value: Value) -> Result<Vec<Value>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => {
                return Err(PanelError::Decode("expected a `data` array in collection".into()))
            }
            Some(other) => {
                return Err(PanelError::Decode(format!(
                    "expected `data` to be an array, found {}",
                    kind_of(&other)
                )))
            }
        },
        other => {
            return Err(PanelError::Decode(format!(
                "expected a collection, found {}",
                kind_of(&other)
            )))
        }
    };

    Ok(items.into_iter().map(unwrap_attributes).collect())
}

/// Items of a relationship list (`relationships.<name>.data`), unwrapped.
///
/// Missing or malformed relationships yield an empty list.
pub fn relationship(entity: &Value, name: &str) -> Vec<Value> {
    entity
        .get("relationships")
        .and_then(|rels| rels.get(name))
        .and_then(|rel| rel.get("data"))
        .and_then(Value::as_array)
        .map(|items| items.iter().cloned().map(unwrap_attributes).collect())
        .unwrap_or_default()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
