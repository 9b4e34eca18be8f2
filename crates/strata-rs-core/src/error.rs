//! Error types for scheme loading and rendering.

use strata_rs_protocol::ResolveError;
use thiserror::Error;

/// Errors returned while loading a configuration scheme.
///
/// Loading is all-or-nothing: any of these aborts the load and no partially
/// merged document is published.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No registered resolver matches the reference.
    #[error("no resolver for {0:?}")]
    NoResolver(String),
    /// The matching resolver failed to fetch or decode the reference.
    #[error("error resolving {reference:?}: {source}")]
    Resolve {
        reference: String,
        #[source]
        source: ResolveError,
    },
    /// Another load into the process-wide slot is still running.
    #[error("configuration load already in progress")]
    LoadInProgress,
}

/// Errors returned while rendering a configuration for diagnostics.
#[derive(Debug, Error)]
pub enum RenderError {
    /// JSON serialization failed.
    #[error("cannot serialise configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML serialization failed.
    #[error("cannot serialise configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl LoadError {
    /// Reference that caused the failure, when there is one.
    pub fn reference(&self) -> Option<&str> {
        match self {
            LoadError::NoResolver(reference) | LoadError::Resolve { reference, .. } => {
                Some(reference.as_str())
            }
            LoadError::LoadInProgress => None,
        }
    }
}
