//! Collapsible-value capability table
//!
//! Decides whether values of a given format may travel as a bare uuid
//! reference. Formats whose instances are uniquely identified by a uuid
//! (concepts, locations) collapse; formats the receiving server expects as
//! full nested objects (providers) or plain literals do not.

use super::descriptor::ValueFormat;
use std::collections::HashSet;

/// Formats that collapse to a uuid reference out of the box
pub const DEFAULT_COLLAPSIBLE_FORMATS: &[&str] = &[
    "org.openmrs.Concept",
    "org.openmrs.Drug",
    "org.openmrs.Location",
    "org.openmrs.User",
];

/// Capability table over value formats
///
/// Unknown formats are not collapsible.
#[derive(Debug, Clone)]
pub struct FormatCapabilities {
    collapsible: HashSet<ValueFormat>,
}

impl FormatCapabilities {
    /// Creates an empty table where no format collapses
    pub fn empty() -> Self {
        Self {
            collapsible: HashSet::new(),
        }
    }

    /// Marks a format as collapsible
    pub fn with_collapsible(mut self, format: impl Into<ValueFormat>) -> Self {
        self.collapsible.insert(format.into());
        self
    }

    /// Marks a format as not collapsible, overriding a default
    pub fn without_collapsible(mut self, format: impl Into<ValueFormat>) -> Self {
        self.collapsible.remove(&format.into());
        self
    }

    /// Returns true if values of `format` may be sent as a bare uuid
    pub fn is_collapsible(&self, format: &ValueFormat) -> bool {
        self.collapsible.contains(format)
    }

    /// Iterates over the collapsible formats
    pub fn collapsible_formats(&self) -> impl Iterator<Item = &ValueFormat> {
        self.collapsible.iter()
    }
}

impl Default for FormatCapabilities {
    fn default() -> Self {
        DEFAULT_COLLAPSIBLE_FORMATS
            .iter()
            .fold(Self::empty(), |table, format| table.with_collapsible(*format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_collapses_concepts() {
        let table = FormatCapabilities::default();
        assert!(table.is_collapsible(&ValueFormat::new("org.openmrs.Concept")));
        assert!(table.is_collapsible(&ValueFormat::new("org.openmrs.Location")));
    }

    #[test]
    fn test_default_table_keeps_providers_and_literals() {
        let table = FormatCapabilities::default();
        assert!(!table.is_collapsible(&ValueFormat::new("org.openmrs.Provider")));
        assert!(!table.is_collapsible(&ValueFormat::new("java.lang.String")));
        assert!(!table.is_collapsible(&ValueFormat::new("java.lang.Boolean")));
    }

    #[test]
    fn test_unknown_format_is_not_collapsible() {
        let table = FormatCapabilities::default();
        assert!(!table.is_collapsible(&ValueFormat::new("org.example.Custom")));
    }

    #[test]
    fn test_table_is_extensible() {
        let table = FormatCapabilities::default()
            .with_collapsible("org.openmrs.Program")
            .without_collapsible("org.openmrs.User");

        assert!(table.is_collapsible(&ValueFormat::new("org.openmrs.Program")));
        assert!(!table.is_collapsible(&ValueFormat::new("org.openmrs.User")));
        assert_eq!(table.collapsible_formats().count(), 4);
    }

    #[test]
    fn test_empty_table() {
        let table = FormatCapabilities::empty();
        assert!(!table.is_collapsible(&ValueFormat::new("org.openmrs.Concept")));
    }
}
