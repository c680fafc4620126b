//! Change classification between a known record and a desired one
//!
//! Decides whether a desired record can be applied in place or whether the
//! entity must be replaced. Only caller-supplied attributes are compared;
//! computed attributes (identities, derived values) never cause a change.

use kineticpanel_domain::{AttributePolicy, ResourceSchema, Result};
use serde::Serialize;
use serde_json::Value;

/// Outcome of comparing a known record with a desired one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedChange {
    NoChange,
    /// Only mutable attributes differ
    Update { changed: Vec<&'static str> },
    /// At least one required-replace attribute differs
    Replace { changed: Vec<&'static str> },
}

impl PlannedChange {
    pub fn requires_replace(&self) -> bool {
        matches!(self, Self::Replace { .. })
    }

    /// Attributes that differ, in schema order
    pub fn changed(&self) -> &[&'static str] {
        match self {
            Self::NoChange => &[],
            Self::Update { changed } | Self::Replace { changed } => changed,
        }
    }
}

/// Classify the difference between two serialized records.
///
/// A missing attribute and an explicit `null` compare equal.
pub fn plan_change(schema: &ResourceSchema, prior: &Value, desired: &Value) -> PlannedChange {
    let mut changed = Vec::new();
    let mut replace = false;

    for attr in schema.attributes.iter().filter(|attr| attr.is_configurable()) {
        let before = prior.get(attr.name).unwrap_or(&Value::Null);
        let after = desired.get(attr.name).unwrap_or(&Value::Null);
        if before != after {
            replace |= attr.policy == AttributePolicy::RequiresReplace;
            changed.push(attr.name);
        }
    }

    match (changed.is_empty(), replace) {
        (true, _) => PlannedChange::NoChange,
        (false, true) => PlannedChange::Replace { changed },
        (false, false) => PlannedChange::Update { changed },
    }
}

/// Typed variant of [`plan_change`].
///
/// # Errors
/// Returns `PanelError::Decode` if either record fails to serialize.
pub fn plan_records<R: Serialize>(
    schema: &ResourceSchema,
    prior: &R,
    desired: &R,
) -> Result<PlannedChange> {
    Ok(plan_change(schema, &serde_json::to_value(prior)?, &serde_json::to_value(desired)?))
}
