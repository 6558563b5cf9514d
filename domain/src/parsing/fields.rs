//! Lenient field readers over a parsed JSON object.
//!
//! Models routinely return a string where a list was requested, numbers as
//! strings, or `"true"` for a boolean. These readers coerce what they
//! reasonably can and read everything else as empty, so a single odd field
//! never discards the rest of a record.

use super::json::JsonObject;
use serde_json::Value;

/// Read a text field. Numbers and booleans are stringified; anything else
/// is empty.
pub fn text_field(obj: &JsonObject, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Read a list of strings. A single string becomes a one-element list;
/// non-string elements are stringified when scalar and skipped otherwise.
pub fn string_list_field(obj: &JsonObject, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(value_to_text).collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Read a boolean, accepting `"true"`/`"yes"` strings.
pub fn bool_field(obj: &JsonObject, key: &str) -> bool {
    match obj.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes"),
        _ => false,
    }
}

/// Read a number, accepting numeric strings. Missing or invalid is `0.0`.
pub fn number_field(obj: &JsonObject, key: &str) -> f64 {
    match obj.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Read a nested object. Anything else is an empty object.
pub fn object_field(obj: &JsonObject, key: &str) -> JsonObject {
    match obj.get(key) {
        Some(Value::Object(map)) => map.clone(),
        _ => JsonObject::new(),
    }
}

/// Read a list of nested objects, skipping non-object elements.
pub fn object_list_field(obj: &JsonObject, key: &str) -> Vec<JsonObject> {
    match obj.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_object().cloned())
            .collect(),
        _ => Vec::new(),
    }
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
