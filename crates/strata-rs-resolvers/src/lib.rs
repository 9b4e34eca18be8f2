//! Concrete resolvers for Strata.
//!
//! File resolvers decode JSON, JSON5, YAML and TOML from disk; the memory
//! resolver serves a fixed document; the secret resolver decodes payloads
//! fetched from a secret manager through a caller-supplied fetcher.

mod file;
mod format;
mod memory;
mod secret;

pub use file::{FILE_SCHEME, FileResolver, maybe_file};
/// Payload formats and their conversion into the value model.
pub use format::Format;
pub use memory::MemoryResolver;
/// Secret-manager backed resolution.
pub use secret::{AWS_SCHEME, FetchError, SecretFetcher, SecretResolver, SecretScheme};
