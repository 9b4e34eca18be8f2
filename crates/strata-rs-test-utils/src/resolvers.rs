use parking_lot::Mutex;
use std::sync::Arc;
use strata_rs_protocol::{Document, ResolveError, Resolver};

/// Matches one exact reference and returns fixed data or a fixed error.
#[derive(Debug, Clone, Default)]
pub struct TestResolver {
    match_on: String,
    data: Document,
    error: Option<String>,
}

impl TestResolver {
    pub fn new(match_on: impl Into<String>, data: Document) -> Self {
        Self {
            match_on: match_on.into(),
            data,
            error: None,
        }
    }

    pub fn empty(match_on: impl Into<String>) -> Self {
        Self::new(match_on, Document::new())
    }

    pub fn failing(match_on: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            match_on: match_on.into(),
            data: Document::new(),
            error: Some(message.into()),
        }
    }
}

impl Resolver for TestResolver {
    fn matches(&self, reference: &str) -> bool {
        reference == self.match_on
    }

    fn resolve(&self, _reference: &str) -> Result<Document, ResolveError> {
        match &self.error {
            Some(message) => Err(ResolveError::Other(message.clone())),
            None => Ok(self.data.clone()),
        }
    }

    fn name(&self) -> &str {
        &self.match_on
    }
}

/// Wraps a resolver and records every reference it was asked to resolve.
#[derive(Clone)]
pub struct RecordingResolver<R> {
    inner: R,
    calls: Arc<Mutex<Vec<String>>>,
}

impl<R: Resolver> RecordingResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the recorded calls; stays valid after the resolver
    /// has been moved into a loader.
    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

impl<R: Resolver> Resolver for RecordingResolver<R> {
    fn matches(&self, reference: &str) -> bool {
        self.inner.matches(reference)
    }

    fn resolve(&self, reference: &str) -> Result<Document, ResolveError> {
        self.calls.lock().push(reference.to_string());
        self.inner.resolve(reference)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
