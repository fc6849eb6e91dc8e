//! Conversion outcomes and batch summaries

use serde::Serialize;

/// What a single conversion did to a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionOutcome {
    /// Resource type key the record was converted under
    pub resource_type: String,

    /// Whether a rule was registered for the resource type
    pub rule_applied: bool,

    /// Nested resources collapsed to their uuid
    pub fields_collapsed: usize,

    /// Fields stripped from the record
    pub fields_removed: usize,

    /// Person attributes left unconverted because their type did not resolve
    pub unresolved_attributes: usize,
}

impl ConversionOutcome {
    /// Creates an outcome for `resource_type` with nothing recorded yet
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            ..Self::default()
        }
    }

    /// Returns true if the record was not modified
    pub fn is_unchanged(&self) -> bool {
        self.fields_collapsed == 0 && self.fields_removed == 0
    }

    pub fn record_collapsed(&mut self) {
        self.fields_collapsed += 1;
    }

    pub fn record_removed(&mut self) {
        self.fields_removed += 1;
    }

    pub fn record_unresolved(&mut self) {
        self.unresolved_attributes += 1;
    }
}

/// A record in a batch that could not be converted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    /// Position of the record in the batch
    pub index: usize,

    /// Error message
    pub message: String,
}

/// Summary of a batch conversion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Resource type key the batch was converted under
    pub resource_type: String,

    /// Total records in the batch
    pub total: usize,

    /// Records converted (including pass-through)
    pub converted: usize,

    /// Records rejected as malformed
    pub failures: Vec<BatchFailure>,

    /// Nested resources collapsed across the batch
    pub fields_collapsed: usize,

    /// Fields stripped across the batch
    pub fields_removed: usize,

    /// Person attributes left unconverted across the batch
    pub unresolved_attributes: usize,
}

impl BatchSummary {
    /// Creates an empty summary for a batch of `total` records
    pub fn new(resource_type: impl Into<String>, total: usize) -> Self {
        Self {
            resource_type: resource_type.into(),
            total,
            ..Self::default()
        }
    }

    /// Folds a single conversion into the summary
    pub fn add_outcome(&mut self, outcome: &ConversionOutcome) {
        self.converted += 1;
        self.fields_collapsed += outcome.fields_collapsed;
        self.fields_removed += outcome.fields_removed;
        self.unresolved_attributes += outcome.unresolved_attributes;
    }

    /// Records a rejected record
    pub fn add_failure(&mut self, index: usize, message: impl Into<String>) {
        self.failures.push(BatchFailure {
            index,
            message: message.into(),
        });
    }

    /// Returns true if every record in the batch was converted
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.converted == self.total
    }
}
