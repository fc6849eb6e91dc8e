//! Observation rule
//!
//! An observation fetched with `v=full` carries its concept and encounter as
//! nested resources. The receiving server expects both as uuid references.

use crate::core::normalize::outcome::ConversionOutcome;
use crate::core::normalize::rule::{ConversionContext, ConversionRule};
use crate::core::normalize::shape::collapse_field;
use crate::domain::Record;

const REFERENCE_FIELDS: &[&str] = &["concept", "encounter"];

/// Rule for `obs` resources
#[derive(Debug, Clone, Copy, Default)]
pub struct ObsRule;

impl ConversionRule for ObsRule {
    fn resource_type(&self) -> &str {
        "obs"
    }

    fn apply(&self, record: &mut Record, _ctx: &ConversionContext<'_>, outcome: &mut ConversionOutcome) {
        for field in REFERENCE_FIELDS {
            if collapse_field(record, field) {
                tracing::trace!(field = %field, "Collapsed observation reference");
                outcome.record_collapsed();
            }
        }
    }
}
