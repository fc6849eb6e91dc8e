//! Attribute type descriptors
//!
//! Metadata about a person attribute type as registered on the originating
//! server. The normalizer only reads descriptors; they are owned and
//! persisted elsewhere.

use crate::domain::ids::AttributeTypeUuid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registered value format of an attribute type
///
/// The format is the fully qualified class name of the value, for example
/// `org.openmrs.Concept` or `java.lang.String`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueFormat(String);

impl ValueFormat {
    /// Creates a value format from its class name
    pub fn new(format: impl Into<String>) -> Self {
        Self(format.into().trim().to_string())
    }

    /// Returns the format as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValueFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ValueFormat {
    fn from(format: &str) -> Self {
        Self::new(format)
    }
}

/// Person attribute type metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeTypeDescriptor {
    /// Attribute type uuid
    pub uuid: AttributeTypeUuid,

    /// Display name (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Declared value format
    pub format: ValueFormat,
}

impl AttributeTypeDescriptor {
    /// Creates a descriptor without a display name
    pub fn new(uuid: AttributeTypeUuid, format: impl Into<ValueFormat>) -> Self {
        Self {
            uuid,
            name: None,
            format: format.into(),
        }
    }

    /// Sets the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
