//! Dotted-path lookup over documents.

use crate::PATH_SEPARATOR;
use std::borrow::Cow;
use strata_rs_protocol::{Document, Value};

/// Resolve a `.`-separated path against a document.
///
/// Every non-final segment must land on a map-shaped value; foreign
/// mappings are reinterpreted on the way down. Values found through a
/// canonical chain are borrowed, anything below a foreign mapping is owned.
pub fn lookup<'a>(document: &'a Document, path: &str) -> Option<Cow<'a, Value>> {
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    lookup_segments(Cow::Borrowed(document), &segments)
}

fn lookup_segments<'a>(document: Cow<'a, Document>, segments: &[&str]) -> Option<Cow<'a, Value>> {
    let (head, rest) = segments.split_first()?;
    match document {
        Cow::Borrowed(document) => {
            let value = document.get(*head)?;
            if rest.is_empty() {
                return Some(Cow::Borrowed(value));
            }
            lookup_segments(value.as_document()?, rest)
        }
        Cow::Owned(mut document) => {
            let value = document.remove(*head)?;
            if rest.is_empty() {
                return Some(Cow::Owned(value));
            }
            lookup_segments(Cow::Owned(value.into_document().ok()?), rest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        Value::from(value).into_document().expect("object")
    }

    #[test]
    fn finds_top_level_and_nested_values() {
        let document = doc(json!({"a": 1, "b": {"c": {"d": "x"}}}));
        assert_eq!(lookup(&document, "a").as_deref(), Some(&Value::Int(1)));
        assert_eq!(
            lookup(&document, "b.c.d").as_deref(),
            Some(&Value::from("x"))
        );
        assert_eq!(
            lookup(&document, "b.c").as_deref(),
            Some(&Value::from(json!({"d": "x"})))
        );
    }

    #[test]
    fn missing_or_non_map_segments_fail() {
        let document = doc(json!({"a": 1, "b": {"c": 2}}));
        assert!(lookup(&document, "x").is_none());
        assert!(lookup(&document, "a.b").is_none());
        assert!(lookup(&document, "b.x").is_none());
        assert!(lookup(&document, "b.c.d").is_none());
        assert!(lookup(&document, "").is_none());
    }

    #[test]
    fn descends_through_foreign_mappings() {
        let mut document = Document::new();
        document.insert(
            "ports".to_string(),
            Value::mapping([(Value::Int(80), Value::from(json!({"name": "http"})))]),
        );
        let found = lookup(&document, "ports.80.name").expect("found");
        assert!(matches!(found, Cow::Owned(_)));
        assert_eq!(found.into_owned(), Value::from("http"));
    }
}
