//! Record model
//!
//! A record is one REST resource instance as deserialized from a server
//! response: an ordered map of field names to JSON values. Field order is
//! preserved (serde_json is built with `preserve_order`).

use super::errors::NormalizerError;
use super::result::Result;
use serde_json::{Map, Value};

/// An ordered, dynamically shaped REST resource
pub type Record = Map<String, Value>;

/// Returns a short name for the JSON kind of `value`, for diagnostics
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Borrows `value` as a record, failing if it is not a mapping
///
/// This is the only structural check that is a hard error: no rule can
/// operate on a top-level value that is not a record.
pub fn as_record_mut(value: &mut Value) -> Result<&mut Record> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(NormalizerError::MalformedRecord(format!(
            "expected a JSON object at the top level, got {}",
            value_kind(other)
        ))),
    }
}
