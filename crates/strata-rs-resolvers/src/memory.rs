//! In-memory resolver.

use strata_rs_protocol::{Document, ResolveError, Resolver};

/// Serves a fixed document under one reference name.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    reference: String,
    document: Document,
}

impl MemoryResolver {
    pub fn new(reference: impl Into<String>, document: Document) -> Self {
        Self {
            reference: reference.into(),
            document,
        }
    }
}

impl Resolver for MemoryResolver {
    fn matches(&self, reference: &str) -> bool {
        reference == self.reference
    }

    fn resolve(&self, _reference: &str) -> Result<Document, ResolveError> {
        Ok(self.document.clone())
    }

    fn name(&self) -> &str {
        &self.reference
    }
}
