//! Right-biased deep merge for documents.

use strata_rs_protocol::{Document, Value};

/// Merge `overlay` into `base`; the overlay wins on conflicts.
///
/// - keys missing from `base` are inserted as-is
/// - map-shaped values on both sides are merged recursively, canonicalizing
///   foreign mappings on the way
/// - everything else (scalars, lists, null) replaces the base value whole
pub fn merge_documents(base: &mut Document, overlay: Document) {
    for (key, value) in overlay {
        match base.get_mut(&key) {
            Some(existing) => merge_value(existing, value),
            None => {
                base.insert(key, value);
            }
        }
    }
}

/// Owned variant of [`merge_documents`].
pub fn merged(mut base: Document, overlay: Document) -> Document {
    merge_documents(&mut base, overlay);
    base
}

/// Merge documents in order, later documents taking precedence.
///
/// Equivalent to folding [`merged`] over the list, starting from empty.
pub fn merge_all(documents: impl IntoIterator<Item = Document>) -> Document {
    documents.into_iter().fold(Document::new(), merged)
}

fn merge_value(slot: &mut Value, overlay: Value) {
    if !(slot.is_map_shaped() && overlay.is_map_shaped()) {
        *slot = overlay;
        return;
    }
    let base = std::mem::replace(slot, Value::Null);
    *slot = match (base.into_document(), overlay.into_document()) {
        (Ok(mut base), Ok(overlay)) => {
            merge_documents(&mut base, overlay);
            Value::Map(base)
        }
        (_, Err(overlay)) => overlay,
        (Err(_), Ok(overlay)) => Value::Map(overlay),
    };
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
    fn adds_simple_value() {
        let mut base = doc(json!({"a": 1, "c": {"d": 3, "e": 4}}));
        merge_documents(&mut base, doc(json!({"b": 2})));
        assert_eq!(base, doc(json!({"a": 1, "b": 2, "c": {"d": 3, "e": 4}})));
    }

    #[test]
    fn adds_to_empty_document() {
        assert_eq!(
            merged(Document::new(), doc(json!({"b": 2}))),
            doc(json!({"b": 2}))
        );
    }

    #[test]
    fn replaces_simple_value() {
        let base = doc(json!({"a": 1, "c": {"d": 3, "e": 4}}));
        assert_eq!(
            merged(base, doc(json!({"a": "x"}))),
            doc(json!({"a": "x", "c": {"d": 3, "e": 4}}))
        );
    }

    #[test]
    fn scalar_replaces_map() {
        let base = doc(json!({"a": {"d": 3, "e": 4}}));
        assert_eq!(merged(base, doc(json!({"a": "x"}))), doc(json!({"a": "x"})));
    }

    #[test]
    fn map_replaces_scalar() {
        let base = doc(json!({"a": 1, "b": 2, "c": {"d": 4}}));
        assert_eq!(
            merged(base, doc(json!({"b": {"f": "x"}}))),
            doc(json!({"a": 1, "b": {"f": "x"}, "c": {"d": 4}}))
        );
    }

    #[test]
    fn nested_maps_union() {
        let base = doc(json!({"c": {"d": 3}}));
        assert_eq!(
            merged(base, doc(json!({"b": 2, "c": {"e": 4}}))),
            doc(json!({"b": 2, "c": {"d": 3, "e": 4}}))
        );
    }

    #[test]
    fn nested_map_replaced_by_scalar() {
        let base = doc(json!({"b": 2, "c": {"f": {"g": "6"}}}));
        assert_eq!(
            merged(base, doc(json!({"c": {"f": "x"}}))),
            doc(json!({"b": 2, "c": {"f": "x"}}))
        );
    }

    #[test]
    fn lists_are_replaced_not_concatenated() {
        let base = doc(json!({"items": [1, 2, 3]}));
        assert_eq!(
            merged(base, doc(json!({"items": [4]}))),
            doc(json!({"items": [4]}))
        );
    }

    #[test]
    fn merges_into_foreign_mapping() {
        let mut base = Document::new();
        base.insert("ports".to_string(), Value::mapping([(80, "http")]));
        merge_documents(&mut base, doc(json!({"ports": {"443": "https"}})));
        assert_eq!(
            base,
            doc(json!({"ports": {"80": "http", "443": "https"}}))
        );
    }

    #[test]
    fn idempotent_and_identity() {
        let a = doc(json!({"a": 1, "c": {"d": [1, 2], "e": {"f": true}}}));
        assert_eq!(merged(a.clone(), a.clone()), a);
        assert_eq!(merged(Document::new(), a.clone()), a);
    }

    #[test]
    fn merge_all_folds_left_to_right() {
        let result = merge_all(vec![
            doc(json!({"a": 1})),
            doc(json!({"b": 2})),
            doc(json!({"a": 3, "c": 4})),
        ]);
        assert_eq!(result, doc(json!({"a": 3, "b": 2, "c": 4})));
    }
}
