//! Shape predicates and field rewrites
//!
//! Records are heterogeneous JSON graphs, so rules never assume a schema.
//! Every rewrite goes through one of these helpers, which check the shape of
//! a value first and do nothing when it does not match. That is what makes
//! conversion idempotent and tolerant of malformed fields.

use crate::domain::Record;
use serde_json::Value;

/// Name of the identifier field on nested resources
pub const UUID_FIELD: &str = "uuid";

/// Returns the uuid of a nested resource
///
/// Matches only a record whose `uuid` field is a non-empty string.
pub fn nested_uuid(value: &Value) -> Option<&str> {
    value
        .as_object()
        .and_then(|record| record.get(UUID_FIELD))
        .and_then(Value::as_str)
        .filter(|uuid| !uuid.is_empty())
}

/// Returns the uuid a reference points at
///
/// A reference is either a bare uuid string or a nested resource.
pub fn reference_uuid(value: &Value) -> Option<&str> {
    match value {
        Value::String(uuid) if !uuid.is_empty() => Some(uuid),
        other => nested_uuid(other),
    }
}

/// Returns the scalar held in a nested resource's `uuid` field
///
/// Unlike [`nested_uuid`] this accepts any non-null scalar, so a numeric
/// identifier is carried over as is. Empty strings, null and containers
/// do not match.
pub fn nested_uuid_scalar(value: &Value) -> Option<&Value> {
    let uuid = value.as_object()?.get(UUID_FIELD)?;
    match uuid {
        Value::String(s) if s.is_empty() => None,
        Value::String(_) | Value::Number(_) | Value::Bool(_) => Some(uuid),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Replaces a nested resource with its uuid
///
/// Returns true if `value` was rewritten.
pub fn collapse_value(value: &mut Value) -> bool {
    let Some(uuid) = nested_uuid_scalar(value).cloned() else {
        return false;
    };
    *value = uuid;
    true
}

/// Collapses `record[field]` to its uuid in place
///
/// A missing field is left missing; a scalar or sequence is left as is.
pub fn collapse_field(record: &mut Record, field: &str) -> bool {
    record.get_mut(field).is_some_and(collapse_value)
}

/// Removes `record[field]`, keeping the order of the remaining fields
pub fn remove_field(record: &mut Record, field: &str) -> bool {
    record.shift_remove(field).is_some()
}

/// Borrows `record[field]` as a nested record, if it is one
pub fn record_field_mut<'a>(record: &'a mut Record, field: &str) -> Option<&'a mut Record> {
    record.get_mut(field).and_then(Value::as_object_mut)
}

/// Iterates over the records held in the sequence `record[field]`
///
/// Elements that are not records are skipped. A missing field or a field
/// that is not a sequence yields nothing.
pub fn records_in_mut<'a>(
    record: &'a mut Record,
    field: &str,
) -> impl Iterator<Item = &'a mut Record> + 'a {
    record
        .get_mut(field)
        .and_then(Value::as_array_mut)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object_mut)
}
