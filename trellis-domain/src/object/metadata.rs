//! Property metadata and typed value access for entities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A snapshot of one property's current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// A string value
    Text(String),
    /// An integer value
    Integer(i64),
    /// A floating-point value
    Float(f64),
    /// A boolean value
    Boolean(bool),
}

impl PropertyValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Text(_) => PropertyKind::Text,
            PropertyValue::Integer(_) => PropertyKind::Integer,
            PropertyValue::Float(_) => PropertyKind::Float,
            PropertyValue::Boolean(_) => PropertyKind::Boolean,
        }
    }

    /// Returns the contained text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the contained integer, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the contained float, if this is a float value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the contained boolean, if this is a boolean value.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

/// The declared type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    Text,
    Integer,
    Float,
    Boolean,
}

impl PropertyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::Text => "text",
            PropertyKind::Integer => "integer",
            PropertyKind::Float => "float",
            PropertyKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Declaration of one property: name, type, and read-only flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    name: &'static str,
    kind: PropertyKind,
    read_only: bool,
}

impl PropertyDescriptor {
    /// Declares a mutable property.
    pub const fn new(name: &'static str, kind: PropertyKind) -> Self {
        Self {
            name,
            kind,
            read_only: false,
        }
    }

    /// Declares a read-only property.
    pub const fn read_only(name: &'static str, kind: PropertyKind) -> Self {
        Self {
            name,
            kind,
            read_only: true,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }
}

/// The declared property table of one entity type.
///
/// Built once per type as a `static` and shared by every instance; the
/// validation engine uses it to enumerate properties for full checks and
/// to reject rules registered against undeclared properties.
#[derive(Debug)]
pub struct EntityMetadata {
    type_name: &'static str,
    properties: &'static [PropertyDescriptor],
}

impl EntityMetadata {
    pub const fn new(type_name: &'static str, properties: &'static [PropertyDescriptor]) -> Self {
        Self {
            type_name,
            properties,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn properties(&self) -> &'static [PropertyDescriptor] {
        self.properties
    }

    /// Looks up the descriptor for a property name.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }
}

/// Typed, table-driven access to an entity's declared property values.
///
/// Implemented per concrete entity with a plain `match` over the declared
/// names; `None` for an undeclared name signals a caller-side programming
/// error.
pub trait PropertyAccess {
    /// The entity type's static property table.
    fn metadata(&self) -> &'static EntityMetadata;

    /// The current value of the named property, or `None` when the name is
    /// not declared.
    fn property_value(&self, name: &str) -> Option<PropertyValue>;
}
