//! Configuration aggregation for Strata.
//!
//! This crate owns the merge engine, the environment overlay, resolver
//! dispatch, scheme loading, and the typed read API over the merged
//! document. The process-wide configuration slot lives in [`global`].

mod coerce;
mod config;
mod dispatch;
mod env;
mod error;
pub mod global;
mod loader;
mod merge;
mod path;

/// Typed coercion of configuration values.
pub use coerce::{Coerce, coerce_list, coerce_map, parse_bool};
/// Immutable configuration handle.
pub use config::Config;
pub use dispatch::ResolverChain;
/// Environment overlay construction.
pub use env::{overlay_from_env, overlay_from_pairs, process_environment};
/// Public error types returned by loading and rendering.
pub use error::{LoadError, RenderError};
/// Scheme loading.
pub use loader::{Loader, load_scheme, scheme_variable};
/// Right-biased document merge.
pub use merge::{merge_all, merge_documents, merged};
pub use path::lookup;

/// Suffix of the environment variable that carries the scheme.
pub const ENV_SUFFIX: &str = "CONFIG";

/// Separator between the prefix and the rest of an environment variable name.
pub const PREFIX_SEPARATOR: char = '_';

/// Separator between references in the scheme variable.
pub const SCHEME_SEPARATOR: char = ',';

/// Separator between path segments in environment variable names.
pub const ENV_PATH_SEPARATOR: &str = "__";

/// Separator between path segments in lookup paths.
pub const PATH_SEPARATOR: char = '.';
