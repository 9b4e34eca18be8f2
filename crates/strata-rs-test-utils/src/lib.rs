//! Test helpers shared across Strata crates.

pub mod document;
pub mod resolvers;

pub use document::{doc, env};
pub use resolvers::{RecordingResolver, TestResolver};
