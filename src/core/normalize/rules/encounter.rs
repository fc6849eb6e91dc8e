//! Encounter rule

use crate::core::normalize::outcome::ConversionOutcome;
use crate::core::normalize::rule::{ConversionContext, ConversionRule};
use crate::core::normalize::shape::{record_field_mut, remove_field};
use crate::domain::Record;

/// Rule for `encounter` resources
///
/// The receiving server rejects location tags nested in an encounter's
/// location. Everything else on the location, and on the encounter itself,
/// is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncounterRule;

impl ConversionRule for EncounterRule {
    fn resource_type(&self) -> &str {
        "encounter"
    }

    fn apply(&self, record: &mut Record, _ctx: &ConversionContext<'_>, outcome: &mut ConversionOutcome) {
        let Some(location) = record_field_mut(record, "location") else {
            return;
        };
        if remove_field(location, "tags") {
            outcome.record_removed();
        }
    }
}
