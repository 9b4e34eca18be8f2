//! File-backed resolvers.

use crate::Format;
use log::debug;
use std::fs;
use strata_rs_protocol::{Document, ResolveError, Resolver};

/// Optional scheme stripped from file references.
pub const FILE_SCHEME: &str = "file://";

/// Reads a file and decodes it with one [`Format`].
///
/// A reference matches when it ends with one of the configured extensions.
#[derive(Debug, Clone)]
pub struct FileResolver {
    format: Format,
    extensions: Vec<String>,
    name: String,
}

impl FileResolver {
    /// Resolver for `format` matching its default extensions.
    pub fn new(format: Format) -> Self {
        Self {
            format,
            extensions: format
                .default_extensions()
                .iter()
                .map(|extension| extension.to_string())
                .collect(),
            name: format!("file:{}", format.name()),
        }
    }

    pub fn json() -> Self {
        Self::new(Format::Json)
    }

    pub fn json5() -> Self {
        Self::new(Format::Json5)
    }

    pub fn yaml() -> Self {
        Self::new(Format::Yaml)
    }

    pub fn toml() -> Self {
        Self::new(Format::Toml)
    }

    /// Replace the matched extensions. An empty list keeps the defaults.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extensions: Vec<String> = extensions.into_iter().map(Into::into).collect();
        if !extensions.is_empty() {
            self.extensions = extensions;
        }
        self
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

impl Resolver for FileResolver {
    fn matches(&self, reference: &str) -> bool {
        self.extensions
            .iter()
            .any(|extension| reference.ends_with(extension.as_str()))
    }

    fn resolve(&self, reference: &str) -> Result<Document, ResolveError> {
        let path = reference.strip_prefix(FILE_SCHEME).unwrap_or(reference);
        debug!(
            "reading config file (format={}, path={path})",
            self.format.name()
        );
        let contents = fs::read_to_string(path)?;
        self.format.decode(&contents)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// True for references that look like local files: `./…` or `file://…`.
pub fn maybe_file(reference: &str) -> bool {
    reference.starts_with("./") || reference.starts_with(FILE_SCHEME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn matches_by_extension_suffix() {
        let yaml = FileResolver::yaml();
        assert!(yaml.matches("config.yaml"));
        assert!(yaml.matches("file:///etc/app/config.yml"));
        assert!(!yaml.matches("config.json"));
        assert!(!yaml.matches("config.yaml.bak"));

        let json = FileResolver::json();
        assert!(json.matches("a.json"));
        assert!(!json.matches("a.json5"));
    }

    #[test]
    fn custom_extensions_replace_defaults() {
        let resolver = FileResolver::json().with_extensions([".conf"]);
        assert!(resolver.matches("app.conf"));
        assert!(!resolver.matches("app.json"));
        let unchanged = FileResolver::json().with_extensions(Vec::<String>::new());
        assert_eq!(unchanged.extensions(), [".json".to_string()]);
    }

    #[test]
    fn names_include_format() {
        assert_eq!(FileResolver::toml().name(), "file:toml");
        assert_eq!(FileResolver::json5().format(), Format::Json5);
    }

    #[test]
    fn maybe_file_recognizes_local_references() {
        assert!(maybe_file("./config.yaml"));
        assert!(maybe_file("file:///etc/config.yaml"));
        assert!(!maybe_file("config.yaml"));
        assert!(!maybe_file("aws-secretsmanager://app"));
    }
}
