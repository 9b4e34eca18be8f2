//! Secret-manager backed resolvers.
//!
//! Vendor clients are not bundled. Callers supply a [`SecretFetcher`] that
//! turns a secret name into its raw payload, and the resolver takes care of
//! reference parsing and decoding.

use crate::Format;
use log::debug;
use std::error::Error;
use std::fmt;
use strata_rs_protocol::{Document, ResolveError, Resolver};

/// Reference scheme for AWS Secrets Manager, e.g. `aws-secretsmanager://app`.
pub const AWS_SCHEME: &str = "aws-secretsmanager";

/// Error type returned by fetchers.
pub type FetchError = Box<dyn Error + Send + Sync>;

/// Fetches the raw payload of a named secret.
pub trait SecretFetcher: Send + Sync {
    fn fetch(&self, name: &str) -> Result<Vec<u8>, FetchError>;
}

impl<F> SecretFetcher for F
where
    F: Fn(&str) -> Result<Vec<u8>, FetchError> + Send + Sync,
{
    fn fetch(&self, name: &str) -> Result<Vec<u8>, FetchError> {
        self(name)
    }
}

/// How a reference names a secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretScheme {
    /// `aws-secretsmanager://<secret-id>`.
    Aws,
    /// `projects/<p>/secrets/<s>[/versions/<v>]` or
    /// `projects/<p>/locations/<l>/secrets/<s>/versions/<v>`.
    Gcp,
}

impl SecretScheme {
    /// Secret name addressed by `reference`, or `None` if the reference
    /// does not use this scheme.
    ///
    /// GCP references without a version resolve to `versions/latest`.
    pub fn secret_name(self, reference: &str) -> Option<String> {
        match self {
            SecretScheme::Aws => {
                let (scheme, id) = reference.split_once("://")?;
                (scheme == AWS_SCHEME && !id.is_empty()).then(|| id.to_string())
            }
            SecretScheme::Gcp => {
                let segments: Vec<&str> = reference.split('/').collect();
                if segments.iter().any(|segment| segment.is_empty()) {
                    return None;
                }
                match segments.as_slice() {
                    ["projects", _, "secrets", _] => Some(format!("{reference}/versions/latest")),
                    ["projects", _, "secrets", _, "versions", _]
                    | ["projects", _, "locations", _, "secrets", _, "versions", _] => {
                        Some(reference.to_string())
                    }
                    _ => None,
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SecretScheme::Aws => "aws-secretsmanager",
            SecretScheme::Gcp => "gcp-secretmanager",
        }
    }
}

/// Resolves secret references through a [`SecretFetcher`] and decodes the
/// payload with a [`Format`] (JSON by default).
pub struct SecretResolver<F> {
    scheme: SecretScheme,
    fetcher: F,
    format: Format,
}

impl<F: SecretFetcher> SecretResolver<F> {
    pub fn new(scheme: SecretScheme, fetcher: F) -> Self {
        Self {
            scheme,
            fetcher,
            format: Format::Json,
        }
    }

    /// AWS Secrets Manager references.
    pub fn aws(fetcher: F) -> Self {
        Self::new(SecretScheme::Aws, fetcher)
    }

    /// GCP Secret Manager references.
    pub fn gcp(fetcher: F) -> Self {
        Self::new(SecretScheme::Gcp, fetcher)
    }

    /// Decode payloads with `format` instead of JSON.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn scheme(&self) -> SecretScheme {
        self.scheme
    }
}

impl<F> fmt::Debug for SecretResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretResolver")
            .field("scheme", &self.scheme)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl<F: SecretFetcher> Resolver for SecretResolver<F> {
    fn matches(&self, reference: &str) -> bool {
        self.scheme.secret_name(reference).is_some()
    }

    fn resolve(&self, reference: &str) -> Result<Document, ResolveError> {
        let name = self.scheme.secret_name(reference).ok_or_else(|| {
            ResolveError::Other(format!(
                "not a {} reference: {reference}",
                self.scheme.name()
            ))
        })?;
        debug!(
            "fetching secret (scheme={}, name={name})",
            self.scheme.name()
        );
        let payload = self
            .fetcher
            .fetch(&name)
            .map_err(|err| ResolveError::Fetch(format!("error fetching secret: {err}")))?;
        let payload = String::from_utf8(payload).map_err(|err| ResolveError::Parse {
            format: self.format.name(),
            message: err.to_string(),
        })?;
        self.format.decode(&payload)
    }

    fn name(&self) -> &str {
        self.scheme.name()
    }
}
