//! Visit rule

use crate::core::normalize::outcome::ConversionOutcome;
use crate::core::normalize::rule::{ConversionContext, ConversionRule};
use crate::core::normalize::shape::remove_field;
use crate::domain::Record;

/// Rule for `visit` resources
///
/// Encounters are synchronized on their own, so an outbound visit never
/// carries its nested encounter list, whatever it contains.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisitRule;

impl ConversionRule for VisitRule {
    fn resource_type(&self) -> &str {
        "visit"
    }

    fn apply(&self, record: &mut Record, _ctx: &ConversionContext<'_>, outcome: &mut ConversionOutcome) {
        if remove_field(record, "encounters") {
            outcome.record_removed();
        }
    }
}
