//! JSON object extraction from free-form completions

use serde_json::{Map, Value};

/// A parsed JSON object
pub type JsonObject = Map<String, Value>;

/// Extract the JSON object contained in `text`.
///
/// 1. Parse the whole (trimmed) text.
/// 2. Otherwise parse the greedy span from the first `{` to the last `}`.
/// 3. Otherwise give up.
///
/// Only objects are accepted; a completion that is a bare JSON array or
/// scalar yields `None`. When the text holds several objects the greedy span
/// covers all of them and usually fails to parse; no further spans are tried.
///
/// # Examples
///
/// ```
/// use council_domain::parsing::extract_json_object;
///
/// let obj = extract_json_object(r#"prefix {"a": 1} suffix"#).unwrap();
/// assert_eq!(obj["a"], 1);
/// assert!(extract_json_object("no json here").is_none());
/// ```
pub fn extract_json_object(text: &str) -> Option<JsonObject> {
    let trimmed = text.trim();

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        return Some(map);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }

    match serde_json::from_str::<Value>(&trimmed[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Extract the JSON object in `text`, or return `fallback` unchanged.
pub fn parse_json_object_or(text: &str, fallback: JsonObject) -> JsonObject {
    extract_json_object(text).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_whole_text_object() {
        let obj = extract_json_object(r#"{"narrative_summary": "ok"}"#).unwrap();
        assert_eq!(obj["narrative_summary"], "ok");
    }

    #[test]
    fn test_object_surrounded_by_prose() {
        let obj = extract_json_object(r#"prefix {"a": 1} suffix"#).unwrap();
        assert_eq!(Value::Object(obj), json!({"a": 1}));
    }

    #[test]
    fn test_fenced_code_block() {
        let text = "Here you go:\n```json\n{\"terms\": [\"pmdd\"]}\n```\nHope it helps";
        let obj = extract_json_object(text).unwrap();
        assert_eq!(obj["terms"], json!(["pmdd"]));
    }

    #[test]
    fn test_nested_braces_use_greedy_span() {
        let text = r#"Result: {"outer": {"inner": {"deep": true}}} done"#;
        let obj = extract_json_object(text).unwrap();
        assert_eq!(obj["outer"]["inner"]["deep"], true);
    }

    #[test]
    fn test_two_objects_are_not_split() {
        // The greedy span covers both objects, which is not valid JSON
        assert!(extract_json_object(r#"{"a": 1} and {"b": 2}"#).is_none());
    }

    #[test]
    fn test_non_object_json_rejected() {
        assert!(extract_json_object("[1, 2, 3]").is_none());
        assert!(extract_json_object("42").is_none());
    }

    #[test]
    fn test_garbage_returns_fallback_exactly() {
        let fallback = object(json!({"narrative_summary": "raw", "candidate_symptoms": []}));
        let parsed = parse_json_object_or("}{ not json at all", fallback.clone());
        assert_eq!(parsed, fallback);
    }

    #[test]
    fn test_unbalanced_braces() {
        assert!(extract_json_object("{\"a\": 1").is_none());
        assert!(extract_json_object("} {").is_none());
        assert!(extract_json_object("").is_none());
    }
}
