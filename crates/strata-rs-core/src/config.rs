//! Immutable configuration handle and its typed read API.

use crate::RenderError;
use crate::coerce::{Coerce, coerce_list, coerce_map};
use crate::path::lookup;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;
use strata_rs_protocol::{Document, Value};

/// A fully merged configuration document.
///
/// Cheap to clone and never mutated after construction. Every getter takes
/// a fallback and returns it when the path does not resolve or the value
/// cannot be coerced; container getters drop individual elements that fail
/// to coerce instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    document: Arc<Document>,
}

impl Config {
    /// Wrap a merged document.
    pub fn new(document: Document) -> Self {
        Self {
            document: Arc::new(document),
        }
    }

    /// Configuration with no keys.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The underlying document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// True when the configuration has no keys.
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Raw value at a dotted path.
    pub fn get(&self, path: &str) -> Option<Cow<'_, Value>> {
        lookup(&self.document, path)
    }

    /// True when the path resolves to a value.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Coerce the value at `path` into any [`Coerce`] type.
    pub fn get_as<T: Coerce>(&self, path: &str, fallback: T) -> T {
        self.get(path)
            .and_then(|value| T::coerce(&value))
            .unwrap_or(fallback)
    }

    /// String at `path`; non-string values use their canonical form.
    pub fn get_string(&self, path: &str, fallback: &str) -> String {
        self.get(path)
            .and_then(|value| String::coerce(&value))
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Integer at `path`; floats truncate and strings are parsed.
    pub fn get_int(&self, path: &str, fallback: i64) -> i64 {
        self.get_as(path, fallback)
    }

    /// Float at `path`; integers widen and strings are parsed.
    pub fn get_float(&self, path: &str, fallback: f64) -> f64 {
        self.get_as(path, fallback)
    }

    /// Boolean at `path`; accepts `1/t/true` and `0/f/false` spellings.
    pub fn get_bool(&self, path: &str, fallback: bool) -> bool {
        self.get_as(path, fallback)
    }

    /// Raw value with no coercion.
    pub fn get_any(&self, path: &str, fallback: Value) -> Value {
        self.get(path).map(Cow::into_owned).unwrap_or(fallback)
    }

    /// String list at `path`; every element renders as a string.
    pub fn get_string_slice(&self, path: &str, fallback: Vec<String>) -> Vec<String> {
        self.get_list(path, fallback)
    }

    /// Integer list at `path`; elements that do not convert are dropped.
    pub fn get_int_slice(&self, path: &str, fallback: Vec<i64>) -> Vec<i64> {
        self.get_list(path, fallback)
    }

    /// Float list at `path`; elements that do not convert are dropped.
    pub fn get_float_slice(&self, path: &str, fallback: Vec<f64>) -> Vec<f64> {
        self.get_list(path, fallback)
    }

    /// Boolean list at `path`; elements that do not convert are dropped.
    pub fn get_bool_slice(&self, path: &str, fallback: Vec<bool>) -> Vec<bool> {
        self.get_list(path, fallback)
    }

    /// String map at `path`; keys and values are stringified.
    pub fn get_string_map(
        &self,
        path: &str,
        fallback: BTreeMap<String, String>,
    ) -> BTreeMap<String, String> {
        self.get_map(path, fallback)
    }

    /// Integer map at `path`; entries that do not convert are dropped.
    pub fn get_int_map(&self, path: &str, fallback: BTreeMap<String, i64>) -> BTreeMap<String, i64> {
        self.get_map(path, fallback)
    }

    /// Float map at `path`; entries that do not convert are dropped.
    pub fn get_float_map(
        &self,
        path: &str,
        fallback: BTreeMap<String, f64>,
    ) -> BTreeMap<String, f64> {
        self.get_map(path, fallback)
    }

    /// Boolean map at `path`; entries that do not convert are dropped.
    pub fn get_bool_map(
        &self,
        path: &str,
        fallback: BTreeMap<String, bool>,
    ) -> BTreeMap<String, bool> {
        self.get_map(path, fallback)
    }

    /// Sequence getter for any [`Coerce`] element type.
    pub fn get_list<T: Coerce>(&self, path: &str, fallback: Vec<T>) -> Vec<T> {
        self.get(path)
            .and_then(|value| coerce_list(&value))
            .unwrap_or(fallback)
    }

    /// Mapping getter for any [`Coerce`] value type.
    pub fn get_map<T: Coerce>(
        &self,
        path: &str,
        fallback: BTreeMap<String, T>,
    ) -> BTreeMap<String, T> {
        self.get(path)
            .and_then(|value| coerce_map(&value))
            .unwrap_or(fallback)
    }

    /// Render as indented JSON.
    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self.document.as_ref())?)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String, RenderError> {
        Ok(serde_yaml::to_string(self.document.as_ref())?)
    }
}

impl From<Document> for Config {
    fn from(document: Document) -> Self {
        Self::new(document)
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}
