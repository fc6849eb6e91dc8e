//! Conversion rule trait
//!
//! A rule is the transformation applied to records of one resource type.
//! Rules are registered in a [`RuleRegistry`](super::registry::RuleRegistry)
//! and looked up by key, so adding a resource type never touches dispatch.

use super::outcome::ConversionOutcome;
use crate::core::attribute::{AttributeTypeResolver, FormatCapabilities};
use crate::domain::{Record, ResourceTypeKey};

/// Collaborators a rule may consult while rewriting a record
pub struct ConversionContext<'a> {
    /// Attribute type lookup
    pub resolver: &'a dyn AttributeTypeResolver,

    /// Collapsible-value capability table
    pub formats: &'a FormatCapabilities,
}

impl<'a> ConversionContext<'a> {
    pub fn new(resolver: &'a dyn AttributeTypeResolver, formats: &'a FormatCapabilities) -> Self {
        Self { resolver, formats }
    }
}

/// Trait for resource conversion rules
///
/// `apply` must never fail on data it chooses not to transform: missing or
/// malformed fields are skipped and the rest of the record is still
/// processed. Implementations only touch the fields they name and never add
/// fields that were not in the input.
pub trait ConversionRule: Send + Sync {
    /// Resource type key this rule is registered under
    fn resource_type(&self) -> &str;

    /// Rewrite `record` in place, recording what changed in `outcome`
    fn apply(&self, record: &mut Record, ctx: &ConversionContext<'_>, outcome: &mut ConversionOutcome);
}

/// A rule backed by a closure
///
/// ```
/// use syncnorm::core::normalize::{FnRule, ConversionRule};
/// use syncnorm::core::normalize::shape::remove_field;
///
/// let rule = FnRule::new("patient", |record, _ctx, outcome| {
///     if remove_field(record, "auditInfo") {
///         outcome.record_removed();
///     }
/// })
/// .unwrap();
/// assert_eq!(rule.resource_type(), "patient");
/// ```
pub struct FnRule<F> {
    resource_type: ResourceTypeKey,
    f: F,
}

impl<F> FnRule<F>
where
    F: Fn(&mut Record, &ConversionContext<'_>, &mut ConversionOutcome) + Send + Sync,
{
    pub fn new(resource_type: impl AsRef<str>, f: F) -> Result<Self, String> {
        Ok(Self {
            resource_type: ResourceTypeKey::new(resource_type)?,
            f,
        })
    }
}

impl<F> ConversionRule for FnRule<F>
where
    F: Fn(&mut Record, &ConversionContext<'_>, &mut ConversionOutcome) + Send + Sync,
{
    fn resource_type(&self) -> &str {
        self.resource_type.as_str()
    }

    fn apply(&self, record: &mut Record, ctx: &ConversionContext<'_>, outcome: &mut ConversionOutcome) {
        (self.f)(record, ctx, outcome)
    }
}
