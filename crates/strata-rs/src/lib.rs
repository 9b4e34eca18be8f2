//! Public SDK surface for Strata.
//!
//! This crate re-exports the core building blocks and provides helpers to
//! keep consumer setup consistent.

/// Re-export for convenience.
pub use strata_rs_core as core;
/// Re-export for convenience.
pub use strata_rs_protocol as protocol;
/// Re-export for convenience.
pub use strata_rs_resolvers as resolvers;

pub use strata_rs_core::{Config, LoadError, Loader, ResolverChain, global};
pub use strata_rs_protocol::{Document, Resolver, Value};

use strata_rs_resolvers::FileResolver;

/// File resolvers for every supported format, in dispatch order:
/// YAML, JSON5, JSON, TOML.
pub fn file_resolvers() -> ResolverChain {
    ResolverChain::new()
        .with(FileResolver::yaml())
        .with(FileResolver::json5())
        .with(FileResolver::json())
        .with(FileResolver::toml())
}

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
