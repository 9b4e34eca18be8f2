//! Value coercions used by the typed getters.
//!
//! Scalars follow a "native first, then parse the canonical string" rule.
//! Containers convert element by element and silently drop elements that
//! fail to coerce.

use std::collections::BTreeMap;
use strata_rs_protocol::{Foreign, Value};

/// Conversion from a configuration value into a Rust type.
pub trait Coerce: Sized {
    /// Attempt the conversion; `None` means the caller falls back.
    fn coerce(value: &Value) -> Option<Self>;
}

/// Always succeeds: strings verbatim, everything else via its canonical
/// representation.
impl Coerce for String {
    fn coerce(value: &Value) -> Option<Self> {
        Some(match value.as_str() {
            Some(text) => text.to_string(),
            None => value.to_string(),
        })
    }
}

/// Native integers, floats truncated toward zero, otherwise a base-10 parse.
impl Coerce for i64 {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Int(value) => Some(*value),
            Value::Float(value) => truncate(*value),
            Value::Foreign(Foreign::Tagged { value, .. }) => i64::coerce(value),
            other => other.to_string().parse().ok(),
        }
    }
}

/// Native floats, widened integers, otherwise a float-literal parse.
impl Coerce for f64 {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Float(value) => Some(*value),
            Value::Int(value) => Some(*value as f64),
            Value::Foreign(Foreign::Tagged { value, .. }) => f64::coerce(value),
            other => other.to_string().parse().ok(),
        }
    }
}

/// Native booleans, otherwise the conventional literals (see [`parse_bool`]).
impl Coerce for bool {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(value) => Some(*value),
            Value::Foreign(Foreign::Tagged { value, .. }) => bool::coerce(value),
            other => parse_bool(&other.to_string()),
        }
    }
}

impl Coerce for Value {
    fn coerce(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

/// Parse `1/t/T/TRUE/true/True` and `0/f/F/FALSE/false/False`.
pub fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Convert a sequence element-wise; `None` if the value is not a sequence.
pub fn coerce_list<T: Coerce>(value: &Value) -> Option<Vec<T>> {
    let items = value.as_sequence()?;
    Some(items.iter().filter_map(T::coerce).collect())
}

/// Convert a mapping value-wise with stringified keys; `None` if the value
/// is not map-shaped.
pub fn coerce_map<T: Coerce>(value: &Value) -> Option<BTreeMap<String, T>> {
    let document = value.as_document()?;
    Some(
        document
            .iter()
            .filter_map(|(key, value)| T::coerce(value).map(|coerced| (key.clone(), coerced)))
            .collect(),
    )
}

fn truncate(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    // i64::MAX is not representable; 2^63 is the first out-of-range float
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}
