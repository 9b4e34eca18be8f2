//! End-to-end loading through the public facade.

use pretty_assertions::assert_eq;
use std::fs;
use strata_rs::{Loader, Resolver, file_resolvers, init_logging};
use tempfile::tempdir;

/// The file resolver chain dispatches on extension.
#[test]
fn file_resolvers_cover_every_format() {
    let chain = file_resolvers();
    assert_eq!(
        chain.names(),
        vec!["file:yaml", "file:json5", "file:json", "file:toml"]
    );
    assert_eq!(chain.dispatch("a.yml").expect("yaml").name(), "file:yaml");
    assert_eq!(chain.dispatch("a.json5").expect("json5").name(), "file:json5");
    assert!(chain.dispatch("a.ini").is_err());
}

/// Scheme variable beats programmatic references; overrides land last.
#[test]
fn scheme_from_environment_snapshot() {
    init_logging();
    let temp = tempdir().expect("tempdir");
    let first = temp.path().join("first.yaml");
    let second = temp.path().join("second.toml");
    fs::write(&first, "name: first\nport: 1\n").expect("write yaml");
    fs::write(&second, "name = \"second\"\n").expect("write toml");
    let scheme = format!("{},{}", first.display(), second.display());

    let config = Loader::new()
        .with_prefix("EX")
        .with_resolvers(file_resolvers())
        .with_references(["ignored.json"])
        .with_environment([
            ("EX_CONFIG".to_string(), scheme),
            ("EX_port".to_string(), "2".to_string()),
        ])
        .load()
        .expect("load");
    assert_eq!(config.get_string("name", ""), "second");
    assert_eq!(config.get_int("port", 0), 2);
}
