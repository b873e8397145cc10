use serde_json::Value;

/// Text form of a JSON string or number, as callers send identifiers either way.
/// Anything else, and blank strings, count as absent.
pub fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    (!text.trim().is_empty()).then_some(text)
}
