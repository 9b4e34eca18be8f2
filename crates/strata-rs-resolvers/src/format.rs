//! Payload formats and their conversion into the value model.

use strata_rs_protocol::{Document, Foreign, ResolveError, Value};

/// Serialization format of a resolved payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Json5,
    Yaml,
    Toml,
}

impl Format {
    /// Label used in errors and log lines.
    pub fn name(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Json5 => "json5",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
        }
    }

    /// File extensions matched by default for this format.
    pub fn default_extensions(self) -> &'static [&'static str] {
        match self {
            Format::Json => &[".json"],
            Format::Json5 => &[".json5"],
            Format::Yaml => &[".yaml", ".yml"],
            Format::Toml => &[".toml"],
        }
    }

    /// Decode a payload whose top level must be a mapping.
    ///
    /// An empty or `null` YAML payload decodes to an empty document.
    pub fn decode(self, payload: &str) -> Result<Document, ResolveError> {
        let value = match self {
            Format::Json => serde_json::from_str::<serde_json::Value>(payload)
                .map(Value::from)
                .map_err(|err| self.parse_error(err))?,
            Format::Json5 => json5::from_str::<serde_json::Value>(payload)
                .map(Value::from)
                .map_err(|err| self.parse_error(err))?,
            Format::Yaml => serde_yaml::from_str::<serde_yaml::Value>(payload)
                .map(yaml_to_value)
                .map_err(|err| self.parse_error(err))?,
            Format::Toml => toml::from_str::<toml::Table>(payload)
                .map(|table| toml_to_value(toml::Value::Table(table)))
                .map_err(|err| self.parse_error(err))?,
        };
        match value {
            Value::Null if self == Format::Yaml => Ok(Document::new()),
            other => other
                .into_document()
                .map_err(|_| ResolveError::NotADocument {
                    format: self.name(),
                }),
        }
    }

    fn parse_error(self, err: impl std::fmt::Display) -> ResolveError {
        ResolveError::Parse {
            format: self.name(),
            message: err.to_string(),
        }
    }
}

/// Convert a YAML tree.
///
/// Mappings whose keys are all strings become canonical maps; any other key
/// shape is kept as a foreign mapping. Tags are preserved as tagged values.
fn yaml_to_value(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(value) => Value::Bool(value),
        serde_yaml::Value::Number(number) => {
            if let Some(value) = number.as_i64() {
                Value::Int(value)
            } else if let Some(value) = number.as_f64() {
                Value::Float(value)
            } else {
                Value::String(number.to_string())
            }
        }
        serde_yaml::Value::String(value) => Value::String(value),
        serde_yaml::Value::Sequence(items) => {
            Value::List(items.into_iter().map(yaml_to_value).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let entries: Vec<(Value, Value)> = mapping
                .into_iter()
                .map(|(key, value)| (yaml_to_value(key), yaml_to_value(value)))
                .collect();
            if entries.iter().all(|(key, _)| matches!(key, Value::String(_))) {
                Value::Map(
                    entries
                        .into_iter()
                        .filter_map(|(key, value)| match key {
                            Value::String(key) => Some((key, value)),
                            _ => None,
                        })
                        .collect(),
                )
            } else {
                Value::Foreign(Foreign::Mapping(entries))
            }
        }
        serde_yaml::Value::Tagged(tagged) => {
            let tagged = *tagged;
            Value::Foreign(Foreign::Tagged {
                tag: tagged.tag.to_string(),
                value: Box::new(yaml_to_value(tagged.value)),
            })
        }
    }
}

/// Convert a TOML tree. Datetimes become their RFC 3339 string form.
fn toml_to_value(value: toml::Value) -> Value {
    match value {
        toml::Value::String(value) => Value::String(value),
        toml::Value::Integer(value) => Value::Int(value),
        toml::Value::Float(value) => Value::Float(value),
        toml::Value::Boolean(value) => Value::Bool(value),
        toml::Value::Datetime(value) => Value::String(value.to_string()),
        toml::Value::Array(items) => Value::List(items.into_iter().map(toml_to_value).collect()),
        toml::Value::Table(table) => Value::Map(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_value(value)))
                .collect(),
        ),
    }
}
