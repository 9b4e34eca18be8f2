//! Environment variable overlay.
//!
//! Given prefix `XX`, the variable `XX_service__Host_Name=localhost` becomes
//! `{"service": {"Host_Name": "localhost"}}`. Casing is preserved and the
//! values always land as strings.

use crate::merge::merge_documents;
use crate::{ENV_PATH_SEPARATOR, ENV_SUFFIX, PREFIX_SEPARATOR};
use log::{debug, warn};
use strata_rs_protocol::{Document, Value};

/// Build the overlay document from `KEY=VALUE` entries.
///
/// Entries without `=` are ignored; the value is everything after the first
/// `=`.
pub fn overlay_from_env<I, S>(prefix: &str, environ: I) -> Document
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let pairs = environ.into_iter().filter_map(|entry| {
        let (key, value) = entry.as_ref().split_once('=')?;
        Some((key.to_string(), value.to_string()))
    });
    overlay_from_pairs(prefix, pairs)
}

/// Build the overlay document from already split `(key, value)` pairs.
///
/// Only keys starting with `<prefix>_` participate; the scheme variable
/// `<prefix>_CONFIG` is skipped. Matching keys are applied in lexical order
/// so that the result does not depend on environment ordering.
pub fn overlay_from_pairs<I, K, V>(prefix: &str, vars: I) -> Document
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    if prefix.is_empty() {
        return Document::new();
    }
    let marker = format!("{prefix}{PREFIX_SEPARATOR}");
    let mut matched: Vec<(String, String)> = vars
        .into_iter()
        .filter_map(|(key, value)| {
            let key = key.into();
            let path = key.strip_prefix(&marker)?;
            if path.is_empty() || path == ENV_SUFFIX {
                return None;
            }
            Some((path.to_string(), value.into()))
        })
        .collect();
    matched.sort_by(|left, right| left.0.cmp(&right.0));

    let mut overlay = Document::new();
    for (path, value) in matched {
        debug!("applying environment override (path={path})");
        merge_documents(&mut overlay, nested_document(&path, value));
    }
    overlay
}

/// Snapshot of the process environment as unicode pairs.
pub fn process_environment() -> Vec<(String, String)> {
    std::env::vars_os()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (Ok(key), Err(_)) => {
                warn!("skipping environment variable with non-unicode value (key={key})");
                None
            }
            (Err(_), _) => None,
        })
        .collect()
}

/// Translate `a__b__c` plus a value into `{"a": {"b": {"c": value}}}`.
fn nested_document(path: &str, value: String) -> Document {
    let segments: Vec<&str> = path.split(ENV_PATH_SEPARATOR).collect();
    let Some((first, rest)) = segments.split_first() else {
        return Document::new();
    };
    let leaf = rest.iter().rev().fold(Value::String(value), |inner, segment| {
        Value::Map(Document::from([(segment.to_string(), inner)]))
    });
    Document::from([(first.to_string(), leaf)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merged;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        Value::from(value).into_document().expect("object")
    }

    #[test]
    fn simple_key() {
        let overlay = overlay_from_env("XX", ["XX_b=2"]);
        assert_eq!(overlay, doc(json!({"b": "2"})));
    }

    #[test]
    fn nested_key_over_base() {
        let overlay = overlay_from_env("XX", ["XX_c__f__g=6"]);
        assert_eq!(
            merged(doc(json!({"a": 1})), overlay),
            doc(json!({"a": 1, "c": {"f": {"g": "6"}}}))
        );
    }

    #[test]
    fn preserves_casing() {
        let overlay = overlay_from_env("XX", ["XX_service__Host_Name=localhost"]);
        assert_eq!(overlay, doc(json!({"service": {"Host_Name": "localhost"}})));
    }

    #[test]
    fn shared_prefixes_compose() {
        let overlay = overlay_from_env(
            "XX",
            ["XX_db__host=h", "XX_db__port=5432", "XX_db__pool__max=4"],
        );
        assert_eq!(
            overlay,
            doc(json!({"db": {"host": "h", "port": "5432", "pool": {"max": "4"}}}))
        );
    }

    #[test]
    fn skips_scheme_variable_and_foreign_prefixes() {
        let overlay = overlay_from_env(
            "XX",
            [
                "XX_CONFIG=a.json,b.json",
                "YY_foo=1",
                "AXX_foo=1",
                "XX=1",
                "XX_=1",
                "XXfoo=1",
                "no-equals-sign",
                "XX_foo=1",
            ],
        );
        assert_eq!(overlay, doc(json!({"foo": "1"})));
    }

    #[test]
    fn value_keeps_everything_after_first_equals() {
        let overlay = overlay_from_env("XX", ["XX_dsn=user=a;pass=b"]);
        assert_eq!(overlay, doc(json!({"dsn": "user=a;pass=b"})));
    }

    #[test]
    fn empty_prefix_matches_nothing() {
        assert!(overlay_from_env("", ["_foo=1", "foo=1"]).is_empty());
    }

    #[test]
    fn deeper_path_wins_over_scalar_regardless_of_order() {
        let forward = overlay_from_pairs("XX", [("XX_a", "1"), ("XX_a__b", "2")]);
        let backward = overlay_from_pairs("XX", [("XX_a__b", "2"), ("XX_a", "1")]);
        assert_eq!(forward, doc(json!({"a": {"b": "2"}})));
        assert_eq!(forward, backward);
    }
}
