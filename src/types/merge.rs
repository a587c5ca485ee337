//! Flat merge of independently serialized field sets
//!
//! The wire format has no nested `definition` object, so outbound documents
//! are built by serializing the envelope part and the definition part on
//! their own and folding both field maps into a single JSON object.

use serde::Serialize;
use serde::ser::Error as _;
use serde_json::{Map, Value};

/// Serialize `base` and `overlay` to JSON objects and merge them.
///
/// Every key of both inputs ends up in the result; on a key present in both,
/// the value from `overlay` wins.
pub fn merge_flat<B, O>(base: &B, overlay: &O) -> Result<Map<String, Value>, serde_json::Error>
where
    B: Serialize + ?Sized,
    O: Serialize + ?Sized,
{
    let mut merged = into_object(serde_json::to_value(base)?)?;
    merged.extend(into_object(serde_json::to_value(overlay)?)?);
    Ok(merged)
}

fn into_object(value: Value) -> Result<Map<String, Value>, serde_json::Error> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(serde_json::Error::custom(format!(
            "expected a JSON object to merge, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
