//! Domain error types
//!
//! This module defines the error hierarchy for syncnorm. Most data problems a
//! conversion runs into are not errors at all: a missing field or a field of
//! the wrong shape is skipped. The variants below cover the conditions that
//! do reach a caller.

use thiserror::Error;

/// Main syncnorm error type
#[derive(Debug, Error)]
pub enum NormalizerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid input to an operation (e.g. an unusable resource path)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The record handed to the normalizer is not a mapping
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// The attribute type lookup could not be performed
    #[error("Attribute type lookup failed for {uuid}: {message}")]
    AttributeType { uuid: String, message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl NormalizerError {
    /// Creates an attribute type lookup error
    pub fn attribute_type(uuid: impl Into<String>, message: impl Into<String>) -> Self {
        NormalizerError::AttributeType {
            uuid: uuid.into(),
            message: message.into(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for NormalizerError {
    fn from(err: std::io::Error) -> Self {
        NormalizerError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for NormalizerError {
    fn from(err: serde_json::Error) -> Self {
        NormalizerError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for NormalizerError {
    fn from(err: toml::de::Error) -> Self {
        NormalizerError::Configuration(format!("TOML parse error: {err}"))
    }
}
