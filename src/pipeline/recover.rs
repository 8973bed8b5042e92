use regex::Regex;
use serde_json::{Map, Value};

/// Best-effort extraction of a JSON object from free-form model output.
///
/// Tries a strict parse of the whole text first, accepting only a JSON
/// object. On failure, takes the span from the first `{` to the last `}`
/// (covering embedded braces) and parses that. Anything else yields an
/// empty map, so a run never fails on formatting noise around otherwise
/// usable output.
pub fn recover_json_object(text: &str) -> Map<String, Value> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        return map;
    }

    let span = Regex::new(r"(?s)\{.*\}").unwrap();
    if let Some(m) = span.find(text) {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(m.as_str()) {
            return map;
        }
    }

    Map::new()
}

/// Read a string field, empty when absent or not a string.
pub fn string_field(map: &Map<String, Value>, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Read a list-of-strings field, skipping non-string entries.
pub fn string_list_field(map: &Map<String, Value>, key: &str) -> Vec<String> {
    map.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
