//! Integration tests for Settings config loading.
//!
//! These tests run without a global config (temp directories only).
//! Every test is `#[serial]` because the INSERTORDER_* layer reads the
//! process environment.

use std::env;
use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use insertorder::application::ApplicationError;
use insertorder::config::{local_config_path, Settings};
use insertorder::domain::{Traversal, ValidationMode};

#[test]
#[serial]
fn given_no_local_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.id_field, "id");
    assert_eq!(settings.parent_field, "parent_id");
    assert_eq!(settings.traversal, Traversal::LevelOrder);
}

#[test]
#[serial]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let local = r#"
id_field = "category_id"
traversal = "stack"
validation = "strict"
"#;
    fs::write(local_config_path(dir.path()), local).unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.id_field, "category_id");
    assert_eq!(settings.parent_field, "parent_id", "unspecified keys keep defaults");
    assert_eq!(settings.traversal, Traversal::Stack);
    assert_eq!(settings.validation, ValidationMode::Strict);
    assert!(settings.pretty);
}

#[test]
#[serial]
fn given_explicit_file_when_load_file_then_applies_it() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(&path, "pretty = false\nparent_field = \"up\"\n").unwrap();

    let settings = Settings::load_file(&path).expect("load file");

    assert!(!settings.pretty);
    assert_eq!(settings.parent_field, "up");
}

#[test]
#[serial]
fn given_missing_explicit_file_when_load_file_then_config_error() {
    let dir = TempDir::new().unwrap();

    let err = Settings::load_file(&dir.path().join("absent.toml")).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
#[serial]
fn given_invalid_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "traversal = [").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
#[serial]
fn given_unknown_traversal_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "traversal = \"sideways\"").unwrap();

    assert!(Settings::load(Some(dir.path())).is_err());
}

#[test]
#[serial]
fn given_identical_field_names_when_load_then_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "id_field = \"ref\"\nparent_field = \"ref\"\n",
    )
    .unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(err.to_string().contains("must differ"));
}

#[test]
#[serial]
fn given_loaded_settings_when_to_toml_then_round_trips() {
    let settings = Settings::default();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roundtrip.toml");
    fs::write(&path, settings.to_toml().unwrap()).unwrap();

    assert_eq!(Settings::load_file(&path).unwrap(), settings);
}

// ============================================================
// INSERTORDER_* environment layer
// ============================================================

/// Sets environment variables for the duration of a test.
struct EnvGuard {
    keys: Vec<&'static str>,
}

impl EnvGuard {
    fn set(vars: &[(&'static str, &str)]) -> Self {
        for (key, value) in vars {
            env::set_var(key, value);
        }
        Self {
            keys: vars.iter().map(|(key, _)| *key).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn given_env_vars_when_load_then_override_defaults() {
    let dir = TempDir::new().unwrap();
    let _env = EnvGuard::set(&[
        ("INSERTORDER_ID_FIELD", "uid"),
        ("INSERTORDER_TRAVERSAL", "stack"),
        ("INSERTORDER_VALIDATION", "strict"),
        ("INSERTORDER_PRETTY", "false"),
    ]);

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.id_field, "uid");
    assert_eq!(settings.parent_field, "parent_id");
    assert_eq!(settings.traversal, Traversal::Stack);
    assert_eq!(settings.validation, ValidationMode::Strict);
    assert!(!settings.pretty);
}

#[test]
#[serial]
fn given_env_and_local_config_when_load_then_env_wins() {
    // Arrange: local file sets both fields, env overrides only one
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "parent_field = \"up\"\ntraversal = \"stack\"\n",
    )
    .unwrap();
    let _env = EnvGuard::set(&[("INSERTORDER_TRAVERSAL", "level-order")]);

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.traversal, Traversal::LevelOrder, "env overrides local file");
    assert_eq!(settings.parent_field, "up", "local file still applies");
}

#[test]
#[serial]
fn given_env_var_when_load_file_then_overrides_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(&path, "validation = \"strict\"\n").unwrap();
    let _env = EnvGuard::set(&[("INSERTORDER_VALIDATION", "lenient")]);

    let settings = Settings::load_file(&path).expect("load file");

    assert_eq!(settings.validation, ValidationMode::Lenient);
}

#[test]
#[serial]
fn given_unknown_traversal_in_env_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let _env = EnvGuard::set(&[("INSERTORDER_TRAVERSAL", "sideways")]);

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("sideways"));
}

#[test]
#[serial]
fn given_unknown_validation_in_env_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let _env = EnvGuard::set(&[("INSERTORDER_VALIDATION", "paranoid")]);

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("paranoid"));
}

#[test]
#[serial]
fn given_env_sets_same_field_names_when_load_then_rejected() {
    let dir = TempDir::new().unwrap();
    let _env = EnvGuard::set(&[("INSERTORDER_PARENT_FIELD", "id")]);

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(err.to_string().contains("must differ"));
}
