//! Ordered resolver registry.

use crate::LoadError;
use log::debug;
use std::fmt;
use std::sync::Arc;
use strata_rs_protocol::Resolver;

/// Resolvers in registration order.
///
/// Order is significant: a reference goes to the first resolver that
/// matches it, which is how ambiguous references are disambiguated.
#[derive(Clone, Default)]
pub struct ResolverChain {
    resolvers: Vec<Arc<dyn Resolver>>,
}

impl ResolverChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resolver, builder style.
    pub fn with(mut self, resolver: impl Resolver + 'static) -> Self {
        self.push(Arc::new(resolver));
        self
    }

    /// Append a shared resolver.
    pub fn push(&mut self, resolver: Arc<dyn Resolver>) {
        debug!("registering resolver (name={})", resolver.name());
        self.resolvers.push(resolver);
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Registered resolver names, in order.
    pub fn names(&self) -> Vec<&str> {
        self.resolvers.iter().map(|resolver| resolver.name()).collect()
    }

    /// Select the first resolver whose `matches` accepts the reference.
    pub fn dispatch(&self, reference: &str) -> Result<&dyn Resolver, LoadError> {
        self.resolvers
            .iter()
            .find(|resolver| resolver.matches(reference))
            .map(|resolver| resolver.as_ref())
            .ok_or_else(|| LoadError::NoResolver(reference.to_string()))
    }
}

impl fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl FromIterator<Arc<dyn Resolver>> for ResolverChain {
    fn from_iter<T: IntoIterator<Item = Arc<dyn Resolver>>>(iter: T) -> Self {
        let mut chain = Self::new();
        for resolver in iter {
            chain.push(resolver);
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strata_rs_protocol::{Document, ResolveError};

    struct Suffix(&'static str);

    impl Resolver for Suffix {
        fn matches(&self, reference: &str) -> bool {
            reference.ends_with(self.0)
        }

        fn resolve(&self, _reference: &str) -> Result<Document, ResolveError> {
            Ok(Document::new())
        }

        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn first_match_wins() {
        let chain = ResolverChain::new()
            .with(Suffix(".json"))
            .with(Suffix("json"))
            .with(Suffix(""));
        assert_eq!(chain.dispatch("a.json").expect("match").name(), ".json");
        assert_eq!(chain.dispatch("ajson").expect("match").name(), "json");
        assert_eq!(chain.dispatch("a.yaml").expect("match").name(), "");
        assert_eq!(chain.names(), vec![".json", "json", ""]);
    }

    #[test]
    fn no_match_is_an_error() {
        let chain = ResolverChain::new().with(Suffix(".json"));
        let err = chain.dispatch("a.yaml").err().expect("no resolver");
        assert_eq!(err.to_string(), "no resolver for \"a.yaml\"");
        assert!(ResolverChain::new().dispatch("x").is_err());
    }
}
