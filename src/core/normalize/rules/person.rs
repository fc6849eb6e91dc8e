//! Person rule
//!
//! Person attributes carry a typed value. Whether the value may travel as a
//! bare uuid depends on the attribute type's registered format, which is
//! external metadata: a concept-typed value collapses, a provider-typed
//! value must be sent as the full nested resource.

use crate::core::normalize::outcome::ConversionOutcome;
use crate::core::normalize::rule::{ConversionContext, ConversionRule};
use crate::core::normalize::shape::{
    collapse_field, nested_uuid_scalar, records_in_mut, reference_uuid,
};
use crate::domain::Record;

const ATTRIBUTES_FIELD: &str = "attributes";
const ATTRIBUTE_TYPE_FIELD: &str = "attributeType";
const VALUE_FIELD: &str = "value";

/// Rule for `person` resources
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonRule;

impl ConversionRule for PersonRule {
    fn resource_type(&self) -> &str {
        "person"
    }

    fn apply(&self, record: &mut Record, ctx: &ConversionContext<'_>, outcome: &mut ConversionOutcome) {
        for attribute in records_in_mut(record, ATTRIBUTES_FIELD) {
            convert_attribute(attribute, ctx, outcome);
        }
    }
}

/// Collapses one attribute's value if its type allows it
///
/// The attribute is left as received when its value is not a nested
/// resource, when its type carries no uuid, or when the type does not
/// resolve.
fn convert_attribute(
    attribute: &mut Record,
    ctx: &ConversionContext<'_>,
    outcome: &mut ConversionOutcome,
) {
    // Already a reference (or a literal): nothing to decide
    if attribute.get(VALUE_FIELD).and_then(nested_uuid_scalar).is_none() {
        return;
    }

    let Some(type_uuid) = attribute
        .get(ATTRIBUTE_TYPE_FIELD)
        .and_then(reference_uuid)
        .map(str::to_owned)
    else {
        tracing::debug!("Person attribute has no attribute type uuid, leaving value as is");
        return;
    };

    let descriptor = match ctx.resolver.resolve(&type_uuid) {
        Ok(Some(descriptor)) => descriptor,
        Ok(None) => {
            tracing::warn!(
                attribute_type = %type_uuid,
                "Unknown person attribute type, leaving value unconverted"
            );
            outcome.record_unresolved();
            return;
        }
        Err(e) => {
            tracing::warn!(
                attribute_type = %type_uuid,
                error = %e,
                "Person attribute type lookup failed, leaving value unconverted"
            );
            outcome.record_unresolved();
            return;
        }
    };

    if !ctx.formats.is_collapsible(&descriptor.format) {
        tracing::trace!(
            attribute_type = %type_uuid,
            format = %descriptor.format,
            "Attribute value format is not collapsible"
        );
        return;
    }

    if collapse_field(attribute, VALUE_FIELD) {
        outcome.record_collapsed();
    }
}
