use strata_rs_protocol::{Document, Value};

/// Build a document from a `json!` object literal.
pub fn doc(value: serde_json::Value) -> Document {
    match Value::from(value).into_document() {
        Ok(document) => document,
        Err(other) => panic!("expected a JSON object, got {}", other.kind()),
    }
}

/// Build an environment snapshot from `(key, value)` pairs.
pub fn env<const N: usize>(vars: [(&str, &str); N]) -> Vec<(String, String)> {
    vars.iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
