//! Coercion between free-form JSON documents and their stored text form.
//!
//! The `properties` column on pages and blocks (and the `content` column on
//! locales) persists an arbitrary JSON object as a plain text blob. Writes
//! accept either a structured value or pre-serialized text; reads absorb
//! decode failures instead of surfacing them.

use serde_json::Value;

/// Encode a value for storage.
///
/// A string value is stored verbatim, without checking that it is valid
/// JSON; anything else is serialized to JSON text.
#[must_use]
pub fn encode(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Decode stored text back into a value.
///
/// Empty text decodes to an empty object. Unparseable text decodes to
/// [`Value::Null`] rather than an error; callers must tolerate it.
#[must_use]
pub fn decode(text: &str) -> Value {
    if text.is_empty() {
        return Value::Object(serde_json::Map::new());
    }
    serde_json::from_str(text).unwrap_or(Value::Null)
}
