//! Resolver capability consumed by the loader.

use crate::Document;
use thiserror::Error;

/// Errors returned while turning a reference into a document.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Reading the underlying source failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The payload could not be decoded.
    #[error("failed to parse {format}: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
    /// The payload decoded, but its top level is not a mapping.
    #[error("{format} payload is not a mapping")]
    NotADocument { format: &'static str },
    /// Fetching from a remote source failed.
    #[error("{0}")]
    Fetch(String),
    /// Any other resolver-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Pluggable source of configuration documents.
///
/// The loader asks each registered resolver in order whether it
/// [`matches`](Resolver::matches) a reference and hands the reference to the
/// first one that does.
pub trait Resolver: Send + Sync {
    /// Return true when this resolver is able to handle the reference.
    fn matches(&self, reference: &str) -> bool;

    /// Resolve the reference to a document.
    fn resolve(&self, reference: &str) -> Result<Document, ResolveError>;

    /// Human-readable name used in log lines.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
