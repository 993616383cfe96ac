//! Tests for configuration and root folder resolution
//!
//! Uses serial_test: tests that touch COCINA_ROOT_FOLDER or COCINA_ROOT
//! run sequentially so they don't race on the process environment.

use cocina_common::config::{
    CompiledDefaults, RootFolderInitializer, RootFolderResolver, TomlConfig, ROOT_ENV,
    ROOT_FOLDER_ENV,
};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

#[test]
#[serial]
fn test_cli_argument_has_highest_priority() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/cocina-env-folder");

    let resolver = RootFolderResolver::new("test-module")
        .with_cli_arg(Some(PathBuf::from("/tmp/cocina-cli-folder")));
    assert_eq!(resolver.resolve(), PathBuf::from("/tmp/cocina-cli-folder"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_root_folder_env_takes_precedence_over_root() {
    env::remove_var(ROOT_FOLDER_ENV);
    env::remove_var(ROOT_ENV);

    env::set_var(ROOT_FOLDER_ENV, "/tmp/cocina-priority-1");
    env::set_var(ROOT_ENV, "/tmp/cocina-priority-2");

    let root_folder = RootFolderResolver::new("test-module").resolve();
    assert_eq!(root_folder, PathBuf::from("/tmp/cocina-priority-1"));

    env::remove_var(ROOT_FOLDER_ENV);
    env::remove_var(ROOT_ENV);
}

#[test]
#[serial]
fn test_alternative_env_var() {
    env::remove_var(ROOT_FOLDER_ENV);
    env::set_var(ROOT_ENV, "/tmp/cocina-env-root");

    let root_folder = RootFolderResolver::new("test-module").resolve();
    assert_eq!(root_folder, PathBuf::from("/tmp/cocina-env-root"));

    env::remove_var(ROOT_ENV);
}

#[test]
#[serial]
fn test_no_overrides_uses_compiled_default() {
    env::remove_var(ROOT_FOLDER_ENV);
    env::remove_var(ROOT_ENV);

    // No config file exists for this module name
    let root_folder = RootFolderResolver::new("nonexistent-module-xyz").resolve();

    assert!(!root_folder.as_os_str().is_empty());
    assert_eq!(root_folder, CompiledDefaults::for_current_platform().root_folder);
}

#[test]
fn test_toml_config_defaults() {
    let config = TomlConfig::from_toml_str("").unwrap();
    assert_eq!(config.port, 3000);
    assert_eq!(config.bind_addr, "127.0.0.1");
    assert_eq!(config.logging.level, "info");
    assert!(config.root_folder.is_none());
}

#[test]
fn test_toml_config_parses_values() {
    let config = TomlConfig::from_toml_str(
        r#"
        root_folder = "/srv/cocina"
        port = 8080
        bind_addr = "0.0.0.0"

        [logging]
        level = "debug"
        "#,
    )
    .unwrap();

    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/cocina")));
    assert_eq!(config.port, 8080);
    assert_eq!(config.bind_addr, "0.0.0.0");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_toml_config_rejects_malformed() {
    assert!(TomlConfig::from_toml_str("port = \"not a number\"").is_err());
}

#[test]
fn test_initializer_layout() {
    let root = PathBuf::from("/tmp/cocina-test-root");
    let initializer = RootFolderInitializer::new(root.clone());

    assert_eq!(initializer.database_path(), root.join("cocina.db"));
    assert_eq!(initializer.uploads_dir(), root.join("uploads"));
    assert_eq!(initializer.seed_file(), root.join("data").join("recipes.json"));
    assert_eq!(initializer.seed_images_dir(), root.join("data").join("images"));
}

#[test]
fn test_initializer_creates_directories_idempotently() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nested").join("cocina");
    let initializer = RootFolderInitializer::new(root.clone());

    assert!(!initializer.database_exists());
    initializer.ensure_directory_exists().unwrap();
    initializer.ensure_directory_exists().unwrap();

    assert!(root.is_dir());
    assert!(initializer.uploads_dir().is_dir());
}
