//! Integration tests for doublon-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> resolve -> merge.

// Integration tests live outside cfg(test)
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use doublon_config::{Config, ConfigError, ConfigWarning, StoreBackend};

/// Writes `content` to `rel` under `root`, creating parent directories.
fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_no_config_returns_default() {
    let env = tempfile::tempdir().unwrap();
    // root = true keeps any real ~/.doublon.toml out of the picture
    write(env.path(), ".doublon.toml", "root = true\n");

    let config = Config::load(env.path()).unwrap();

    assert_eq!(config.limits.brands, 5);
    assert!((config.matching.gate - 0.7).abs() < f64::EPSILON);
    assert_eq!(config.store.backend, StoreBackend::Json);
    assert_eq!(config.config_root.as_deref(), Some(env.path()));
}

#[test]
fn test_load_nested_configs() {
    let env = tempfile::tempdir().unwrap();
    write(
        env.path(),
        ".doublon.toml",
        r#"
root = true

[store]
path = "shared/snapshot.json"

[server]
port = 9100
"#,
    );
    write(
        env.path(),
        "moderation/.doublon.toml",
        r#"
[limits]
brands = 10

[thresholds]
low = 0.3
"#,
    );
    let working_dir = env.path().join("moderation/queue");
    fs::create_dir_all(&working_dir).unwrap();

    let config = Config::load(&working_dir).unwrap();

    assert_eq!(config.limits.brands, 10);
    assert_eq!(config.server.port, 9100);
    assert!((config.thresholds.low - 0.3).abs() < f64::EPSILON);
    assert_eq!(
        config.store.path,
        Some(env.path().join("shared/snapshot.json"))
    );
    assert_eq!(
        config.config_root,
        Some(env.path().join("moderation"))
    );
}

#[test]
fn test_load_invalid_config_errors() {
    let env = tempfile::tempdir().unwrap();
    write(env.path(), ".doublon.toml", "root = true\n[limits\n");

    let result = Config::load(env.path());

    assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
}

#[test]
fn test_validate_after_load() {
    let env = tempfile::tempdir().unwrap();
    write(env.path(), "snapshot.json", "{}");
    write(
        env.path(),
        ".doublon.toml",
        r#"
root = true

[store]
path = "snapshot.json"

[limits]
controversies = 0
"#,
    );

    let config = Config::load(env.path()).unwrap();
    let warnings = config.validate();

    assert_eq!(
        warnings,
        vec![ConfigWarning::ZeroLimit {
            key: "limits.controversies"
        }]
    );
}

#[test]
fn test_load_from_files_explicit_order() {
    let env = tempfile::tempdir().unwrap();
    let first = write(env.path(), "a.toml", "[matching]\ngate = 0.8\n");
    let second = write(env.path(), "b.toml", "[matching]\ngate = 0.5\n[server]\nhost = \"0.0.0.0\"\n");

    let config = Config::load_from_files(&[first, second]).unwrap();

    assert!((config.matching.gate - 0.8).abs() < f64::EPSILON);
    assert_eq!(config.server.host, "0.0.0.0");
}
