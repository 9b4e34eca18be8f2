//! File resolver tests against real files.

use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::path::Path;
use strata_rs_core::Loader;
use strata_rs_protocol::{ResolveError, Resolver, Value};
use strata_rs_resolvers::{FileResolver, MemoryResolver};
use strata_rs_test_utils::{doc, env};
use tempfile::tempdir;

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write config");
    path.to_string_lossy().to_string()
}

fn file_loader() -> Loader {
    Loader::new()
        .with_prefix("FILETEST")
        .with_resolver(FileResolver::yaml())
        .with_resolver(FileResolver::json5())
        .with_resolver(FileResolver::json())
        .with_resolver(FileResolver::toml())
}

/// Files of every format merge in scheme order.
#[test]
fn mixed_formats_merge_in_order() {
    let temp = tempdir().expect("tempdir");
    let base = write(
        temp.path(),
        "base.yaml",
        "service:\n  name: svc\n  port: 8080\nfeatures: [a, b]\n",
    );
    let overrides = write(temp.path(), "overrides.json", r#"{"service": {"port": 9090}}"#);
    let extra = write(temp.path(), "extra.toml", "[service]\ndebug = true\n");
    let local = write(temp.path(), "local.json5", "{ features: ['c'], }");

    let config = file_loader()
        .with_references([base, format!("file://{overrides}"), extra, local])
        .with_environment(env([("FILETEST_service__name", "from-env")]))
        .load()
        .expect("load");

    assert_eq!(config.get_string("service.name", ""), "from-env");
    assert_eq!(config.get_int("service.port", 0), 9090);
    assert!(config.get_bool("service.debug", false));
    assert_eq!(config.get_string_slice("features", Vec::new()), vec!["c"]);
}

/// A missing file surfaces as an io error naming the reference.
#[test]
fn missing_file_is_a_resolve_error() {
    let temp = tempdir().expect("tempdir");
    let missing = temp.path().join("absent.yaml").to_string_lossy().to_string();
    let err = file_loader()
        .with_references([missing.clone()])
        .with_environment(env([]))
        .load()
        .unwrap_err();
    assert_eq!(err.reference(), Some(missing.as_str()));
    assert!(err.to_string().contains("io error"));
}

/// Malformed payloads fail the whole load.
#[test]
fn malformed_file_fails_the_load() {
    let temp = tempdir().expect("tempdir");
    let good = write(temp.path(), "good.json", r#"{"a": 1}"#);
    let bad = write(temp.path(), "bad.json", "{");
    let err = file_loader()
        .with_references([good, bad])
        .with_environment(env([]))
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("failed to parse json"));
}

/// A YAML file holding a list is not a document.
#[test]
fn non_mapping_file_is_rejected() {
    let temp = tempdir().expect("tempdir");
    let path = write(temp.path(), "list.yml", "- a\n- b\n");
    let err = FileResolver::yaml().resolve(&path).unwrap_err();
    assert!(matches!(err, ResolveError::NotADocument { format: "yaml" }));
}

/// Memory sources and files share one scheme.
#[test]
fn memory_defaults_under_files() {
    let temp = tempdir().expect("tempdir");
    let file = write(temp.path(), "app.yaml", "log:\n  level: debug\n");
    let config = file_loader()
        .with_resolver(MemoryResolver::new(
            "defaults",
            doc(json!({"log": {"level": "info", "format": "text"}})),
        ))
        .with_references(["defaults".to_string(), file])
        .with_environment(env([]))
        .load()
        .expect("load");
    assert_eq!(
        config.get_any("log", Value::Null),
        Value::from(json!({"level": "debug", "format": "text"}))
    );
}
