//! Attribute schemas for managed records and query snapshots
//!
//! Every adapter owns a fixed, compile-time schema describing its attributes,
//! how each one is supplied and which mutability class it belongs to. The
//! host uses the schema to decide between an in-place update and a
//! destroy-then-create replacement.

use serde::Serialize;

/// Value type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    String,
    Int,
    Float,
    Bool,
    StringMap,
    StringList,
    Object,
    ObjectList,
}

/// Who supplies the attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Required,
    Optional,
    Computed,
}

/// Mutability class of an attribute, fixed at schema-definition time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributePolicy {
    /// A change invalidates the remote identity and forces replacement
    RequiresReplace,
    /// A change is applied in place
    Mutable,
    /// Assigned once by the remote system and held across cycles
    ComputedStable,
    /// Re-derived on every read (query snapshots)
    Computed,
    /// Query input; read once per query and never updated
    Parameter,
}

/// One attribute of a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub presence: Presence,
    pub policy: AttributePolicy,
    pub sensitive: bool,
    pub description: &'static str,
}

impl AttributeSpec {
    /// Caller-supplied attribute whose change forces replacement
    pub const fn replace(name: &'static str, kind: AttributeKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Required,
            policy: AttributePolicy::RequiresReplace,
            sensitive: false,
            description,
        }
    }

    /// Caller-supplied attribute updated in place
    pub const fn mutable(name: &'static str, kind: AttributeKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Required,
            policy: AttributePolicy::Mutable,
            sensitive: false,
            description,
        }
    }

    /// Identity assigned at creation and kept stable afterwards
    pub const fn identity(name: &'static str, kind: AttributeKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Computed,
            policy: AttributePolicy::ComputedStable,
            sensitive: false,
            description,
        }
    }

    /// Value derived on every read
    pub const fn computed(name: &'static str, kind: AttributeKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Computed,
            policy: AttributePolicy::Computed,
            sensitive: false,
            description,
        }
    }

    /// Caller-supplied query input
    pub const fn parameter(name: &'static str, kind: AttributeKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Required,
            policy: AttributePolicy::Parameter,
            sensitive: false,
            description,
        }
    }

    /// Mark the attribute optional
    pub const fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    /// Mark the attribute sensitive
    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// True when the caller may supply the value
    pub fn is_configurable(&self) -> bool {
        !matches!(self.presence, Presence::Computed)
    }
}

/// Schema of one resource or query type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceSchema {
    pub type_name: &'static str,
    pub description: &'static str,
    pub attributes: &'static [AttributeSpec],
    pub importable: bool,
}

impl ResourceSchema {
    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Names of attributes whose change forces replacement
    pub fn replacement_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes
            .iter()
            .filter(|attr| attr.policy == AttributePolicy::RequiresReplace)
            .map(|attr| attr.name)
    }
}
