//! Scheme loader: resolve, merge, overlay.
//!
//! A scheme is an ordered list of references. Each one is dispatched to a
//! resolver, the resulting documents are merged left to right into a fresh
//! document, and finally environment overrides are merged on top. Nothing
//! is published until every step succeeded.


use crate::dispatch::ResolverChain;
use crate::env::{overlay_from_pairs, process_environment};
use crate::merge::merge_documents;
use crate::{Config, ENV_SUFFIX, LoadError, PREFIX_SEPARATOR, SCHEME_SEPARATOR};
use log::{debug, info};
use std::sync::Arc;
use strata_rs_protocol::{Document, Resolver};

/// Builder describing one load operation.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    /// Environment prefix; empty disables the scheme variable and overrides.
    prefix: String,
    /// Resolvers in dispatch order.
    resolvers: ResolverChain,
    /// Programmatic scheme, superseded by `<PREFIX>_CONFIG` when set.
    references: Vec<String>,
    /// Environment snapshot; `None` reads the process environment at load.
    environment: Option<Vec<(String, String)>>,
}

impl Loader {
    /// Create a loader with no prefix, resolvers or references.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the environment prefix, e.g. `XX` for `XX_CONFIG` and `XX_*`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Append a resolver; registration order is dispatch order.
    pub fn with_resolver(mut self, resolver: impl Resolver + 'static) -> Self {
        self.resolvers.push(Arc::new(resolver));
        self
    }

    /// Replace the resolver chain.
    pub fn with_resolvers(mut self, resolvers: ResolverChain) -> Self {
        self.resolvers = resolvers;
        self
    }

    /// Append one reference to the programmatic scheme.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.push(reference.into());
        self
    }

    /// Append references to the programmatic scheme.
    pub fn with_references<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references.extend(references.into_iter().map(Into::into));
        self
    }

    /// Use a fixed environment snapshot instead of the process environment.
    pub fn with_environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = Some(
            vars.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }

    /// Environment prefix; empty when overrides are disabled.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Registered resolvers in dispatch order.
    pub fn resolvers(&self) -> &ResolverChain {
        &self.resolvers
    }

    /// Effective scheme: `<PREFIX>_CONFIG` if non-empty, otherwise the
    /// programmatic references. Entries are trimmed; a blank entry stays in
    /// the scheme and fails dispatch like any other unmatched reference.
    pub fn scheme(&self) -> Vec<String> {
        self.scheme_from(&self.environment())
    }

    /// Run the load and return the merged configuration.
    pub fn load(&self) -> Result<Config, LoadError> {
        let environment = self.environment();
        let scheme = self.scheme_from(&environment);
        info!(
            "loading configuration (prefix={}, references={}, resolvers={})",
            self.prefix,
            scheme.len(),
            self.resolvers.len()
        );

        let mut document = load_scheme(&self.resolvers, &scheme)?;
        if !self.prefix.is_empty() {
            let overlay = overlay_from_pairs(&self.prefix, environment);
            debug!("merging environment overlay (keys={})", overlay.len());
            merge_documents(&mut document, overlay);
        }

        info!("configuration loaded (keys={})", document.len());
        Ok(Config::new(document))
    }

    fn environment(&self) -> Vec<(String, String)> {
        match &self.environment {
            Some(vars) => vars.clone(),
            None => process_environment(),
        }
    }

    fn scheme_from(&self, environment: &[(String, String)]) -> Vec<String> {
        let from_env = if self.prefix.is_empty() {
            None
        } else {
            let variable = scheme_variable(&self.prefix);
            environment
                .iter()
                .find(|(key, _)| *key == variable)
                .map(|(_, value)| value.as_str())
                .filter(|value| !value.is_empty())
        };
        let raw: Vec<&str> = match from_env {
            Some(list) => {
                debug!(
                    "scheme taken from environment (variable={})",
                    scheme_variable(&self.prefix)
                );
                list.split(SCHEME_SEPARATOR).collect()
            }
            None => self.references.iter().map(String::as_str).collect(),
        };
        normalize_references(raw)
    }
}

/// Name of the scheme variable for a prefix, e.g. `XX_CONFIG`.
pub fn scheme_variable(prefix: &str) -> String {
    format!("{prefix}{PREFIX_SEPARATOR}{ENV_SUFFIX}")
}

/// Resolve and merge references in order into a fresh document.
///
/// Every reference is dispatched before any is resolved, so a scheme with
/// an unknown reference fails without touching a single source.
pub fn load_scheme<I, S>(resolvers: &ResolverChain, references: I) -> Result<Document, LoadError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let references = normalize_references(references);
    let dispatched = references
        .iter()
        .map(|reference| {
            resolvers
                .dispatch(reference)
                .map(|resolver| (reference.as_str(), resolver))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut document = Document::new();
    for (reference, resolver) in dispatched {
        debug!(
            "resolving reference (reference={reference}, resolver={})",
            resolver.name()
        );
        let resolved = resolver
            .resolve(reference)
            .map_err(|source| LoadError::Resolve {
                reference: reference.to_string(),
                source,
            })?;
        debug!(
            "merging reference (reference={reference}, keys={})",
            resolved.len()
        );
        merge_documents(&mut document, resolved);
    }
    Ok(document)
}

fn normalize_references<I, S>(references: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    references
        .into_iter()
        .map(|reference| reference.as_ref().trim().to_string())
        .collect()
}
