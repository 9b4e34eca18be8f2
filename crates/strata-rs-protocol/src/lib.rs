//! Shared value model and resolver contract for Strata.
//!
//! Every other crate in the workspace speaks in terms of [`Value`] and
//! [`Document`]; resolvers produce them and the core engine merges and reads
//! them.

mod resolver;
mod value;

/// Resolver capability and its error type.
pub use resolver::{ResolveError, Resolver};
/// Tagged value model.
pub use value::{Document, Foreign, Value};
