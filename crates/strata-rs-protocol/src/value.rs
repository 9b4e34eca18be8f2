//! Tagged value model shared by resolvers, the merge engine and accessors.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Hierarchical key-value configuration tree.
pub type Document = BTreeMap<String, Value>;

/// Any datum a configuration source can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null from a structured source.
    Null,
    /// UTF-8 string.
    String(String),
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Ordered sequence.
    List(Vec<Value>),
    /// Canonical string-keyed mapping.
    Map(Document),
    /// Non-canonical shape reinterpreted at use time.
    Foreign(Foreign),
}

/// Container shapes that are not canonical and get reinterpreted on use.
#[derive(Debug, Clone, PartialEq)]
pub enum Foreign {
    /// Mapping keyed by non-string values, e.g. YAML `{10: a, true: b}`.
    Mapping(Vec<(Value, Value)>),
    /// Tagged payload, e.g. YAML `!env value`. Reads see through the tag.
    Tagged { tag: String, value: Box<Value> },
}

impl Value {
    /// Build a foreign mapping from arbitrary key/value pairs.
    pub fn mapping<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Foreign(Foreign::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        ))
    }

    /// Short type label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Foreign(Foreign::Mapping(_)) => "foreign-map",
            Value::Foreign(Foreign::Tagged { .. }) => "tagged",
        }
    }

    /// True for canonical maps and anything reinterpretable as one.
    pub fn is_map_shaped(&self) -> bool {
        match self {
            Value::Map(_) | Value::Foreign(Foreign::Mapping(_)) => true,
            Value::Foreign(Foreign::Tagged { value, .. }) => value.is_map_shaped(),
            _ => false,
        }
    }

    /// Reinterpret the value as a document.
    ///
    /// Canonical maps are borrowed. Foreign mappings are converted by
    /// stringifying each key through [`fmt::Display`]; when two keys
    /// stringify identically the later entry wins. An empty foreign mapping
    /// yields an empty document.
    pub fn as_document(&self) -> Option<Cow<'_, Document>> {
        match self {
            Value::Map(map) => Some(Cow::Borrowed(map)),
            Value::Foreign(Foreign::Mapping(entries)) => Some(Cow::Owned(
                entries
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.clone()))
                    .collect(),
            )),
            Value::Foreign(Foreign::Tagged { value, .. }) => value.as_document(),
            _ => None,
        }
    }

    /// Owned counterpart of [`Value::as_document`]; returns the value
    /// unchanged when it is not map-shaped.
    pub fn into_document(self) -> Result<Document, Value> {
        match self {
            Value::Map(map) => Ok(map),
            Value::Foreign(Foreign::Mapping(entries)) => Ok(entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect()),
            Value::Foreign(Foreign::Tagged { tag, value }) => {
                if value.is_map_shaped() {
                    value.into_document()
                } else {
                    Err(Value::Foreign(Foreign::Tagged { tag, value }))
                }
            }
            other => Err(other),
        }
    }

    /// Reinterpret the value as a sequence.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            Value::Foreign(Foreign::Tagged { value, .. }) => value.as_sequence(),
            _ => None,
        }
    }

    /// Borrow the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            Value::Foreign(Foreign::Tagged { value, .. }) => value.as_str(),
            _ => None,
        }
    }
}

/// Canonical human-readable representation.
///
/// Strings render verbatim, numbers and booleans in their shortest literal
/// form (`1.0` renders `1`), containers as compact JSON.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::String(value) => f.write_str(value),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Foreign(Foreign::Tagged { value, .. }) => fmt::Display::fmt(value, f),
            Value::List(_) | Value::Map(_) | Value::Foreign(Foreign::Mapping(_)) => {
                let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&rendered)
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::String(value) => serializer.serialize_str(value),
            Value::Int(value) => serializer.serialize_i64(*value),
            Value::Float(value) => serializer.serialize_f64(*value),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => map.serialize(serializer),
            Value::Foreign(Foreign::Mapping(entries)) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(&key.to_string(), value)?;
                }
                map.end()
            }
            Value::Foreign(Foreign::Tagged { value, .. }) => value.serialize(serializer),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Value {
    fn from(map: BTreeMap<String, V>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<V: Into<Value>> From<HashMap<String, V>> for Value {
    fn from(map: HashMap<String, V>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(value) => Value::Bool(value),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(value) => Value::Int(value),
                // u64 beyond i64 range widens to float
                None => number
                    .as_f64()
                    .map(Value::Float)
                    .unwrap_or_else(|| Value::String(number.to_string())),
            },
            serde_json::Value::String(value) => Value::String(value),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}
