//! Configuration schema types
//!
//! This module defines the configuration structure for syncnorm.

use crate::core::attribute::{AttributeTypeDescriptor, FormatCapabilities};
use crate::domain::{ResourceTypeKey, DEFAULT_REST_PREFIX};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Main syncnorm configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncnormConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Normalizer settings
    #[serde(default)]
    pub normalizer: NormalizerConfig,

    /// Collapsible-value capability overrides
    #[serde(default)]
    pub formats: FormatsConfig,

    /// Known person attribute types
    #[serde(default)]
    pub attribute_types: Vec<AttributeTypeDescriptor>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SyncnormConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.normalizer.validate()?;
        self.formats.validate()?;
        validate_attribute_types(&self.attribute_types)?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Normalizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Versioned REST prefix stripped from request paths
    #[serde(default = "default_rest_prefix")]
    pub rest_prefix: String,

    /// Built-in rules to turn off (their resource types pass through)
    #[serde(default)]
    pub disabled_rules: Vec<String>,
}

impl NormalizerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.rest_prefix.trim().is_empty() {
            return Err("normalizer.rest_prefix cannot be empty".to_string());
        }
        if !self.rest_prefix.starts_with('/') {
            return Err(format!(
                "normalizer.rest_prefix must start with '/', got '{}'",
                self.rest_prefix
            ));
        }

        for rule in &self.disabled_rules {
            ResourceTypeKey::new(rule)
                .map_err(|e| format!("Invalid entry in normalizer.disabled_rules: {e}"))?;
        }

        Ok(())
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            rest_prefix: default_rest_prefix(),
            disabled_rules: Vec::new(),
        }
    }
}

/// Collapsible-value capability overrides
///
/// Applied on top of the built-in table: `collapsible` adds formats,
/// `non_collapsible` removes them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatsConfig {
    /// Additional formats whose values may be sent as a bare uuid
    #[serde(default)]
    pub collapsible: Vec<String>,

    /// Formats whose values must always be sent in full
    #[serde(default)]
    pub non_collapsible: Vec<String>,
}

impl FormatsConfig {
    fn validate(&self) -> Result<(), String> {
        if self
            .collapsible
            .iter()
            .chain(&self.non_collapsible)
            .any(|format| format.trim().is_empty())
        {
            return Err("formats entries cannot be empty".to_string());
        }

        let collapsible: HashSet<&str> = self.collapsible.iter().map(|f| f.trim()).collect();
        if let Some(conflict) = self
            .non_collapsible
            .iter()
            .find(|format| collapsible.contains(format.trim()))
        {
            return Err(format!(
                "Format '{conflict}' is listed as both collapsible and non_collapsible"
            ));
        }

        Ok(())
    }

    /// Builds the capability table these overrides describe
    pub fn to_capabilities(&self) -> FormatCapabilities {
        let table = self
            .collapsible
            .iter()
            .fold(FormatCapabilities::default(), |table, format| {
                table.with_collapsible(format.as_str())
            });
        self.non_collapsible
            .iter()
            .fold(table, |table, format| table.without_collapsible(format.as_str()))
    }
}

fn validate_attribute_types(attribute_types: &[AttributeTypeDescriptor]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for descriptor in attribute_types {
        if descriptor.uuid.as_str().trim().is_empty() {
            return Err("attribute_types entries require a uuid".to_string());
        }
        if descriptor.format.as_str().is_empty() {
            return Err(format!(
                "attribute_types entry '{}' has an empty format",
                descriptor.uuid
            ));
        }
        if !seen.insert(descriptor.uuid.as_str()) {
            return Err(format!(
                "Duplicate attribute_types entry '{}'",
                descriptor.uuid
            ));
        }
    }
    Ok(())
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_rest_prefix() -> String {
    DEFAULT_REST_PREFIX.to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
