//! Configuration tests
//!
//! This module contains tests for the configuration system.

use std::env;
use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::tempdir;

use anon_router_manager::config::{ManagerConfig, ENV_PREFIX};
use anon_router_manager::ProxyKind;

fn clear_env() {
    for name in [
        "DATA_DIR",
        "LOG_LEVEL",
        "HTTP_PROXY_LISTEN",
        "HTTP_PROXY_PORT",
        "HTTPS_PROXY_LISTEN",
        "HTTPS_PROXY_PORT",
    ] {
        env::remove_var(format!("{}{}", ENV_PREFIX, name));
    }
}

/// Test configuration from file
#[test]
fn test_file_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config_path = dir.path().join("config.json");

    let config_content = r#"{
        "data_dir": "/var/lib/router",
        "log_level": "debug",
        "http_proxy": { "listen": "0.0.0.0", "port": 8080 },
        "https_proxy": { "listen": "0.0.0.0", "port": 8443 }
    }"#;
    fs::write(&config_path, config_content).expect("Failed to write test config file");

    let config = ManagerConfig::from_file(&config_path).expect("Failed to load config from file");

    assert_eq!(config.data_dir, PathBuf::from("/var/lib/router"));
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.http_proxy.listen, "0.0.0.0");
    assert_eq!(config.http_proxy.port, 8080);
    assert_eq!(config.https_proxy.port, 8443);
}

/// Test that a missing file surfaces an IO error
#[test]
fn test_missing_file_config() {
    let result = ManagerConfig::from_file("does-not-exist.json");
    assert!(result.is_err(), "Missing config file should be an error");
}

/// Test configuration from environment variables
#[test]
#[serial]
fn test_env_config() {
    clear_env();
    env::set_var("ANON_ROUTER_DATA_DIR", "/tmp/router");
    env::set_var("ANON_ROUTER_LOG_LEVEL", "trace");
    env::set_var("ANON_ROUTER_HTTP_PROXY_PORT", "8080");
    env::set_var("ANON_ROUTER_HTTPS_PROXY_LISTEN", "0.0.0.0");

    let mut config = ManagerConfig::default();
    config.apply_env().expect("Environment overrides should apply");
    clear_env();

    assert_eq!(config.data_dir, PathBuf::from("/tmp/router"));
    assert_eq!(config.log_level, "trace");
    assert_eq!(config.http_proxy.port, 8080);
    assert_eq!(config.https_proxy.listen, "0.0.0.0");
    // Untouched values keep their defaults.
    assert_eq!(config.http_proxy.listen, "127.0.0.1");
    assert_eq!(config.proxy_defaults(ProxyKind::Https).1, 4447);
}

/// Test that an unparsable port in the environment is rejected
#[test]
#[serial]
fn test_env_config_bad_port() {
    clear_env();
    env::set_var("ANON_ROUTER_HTTP_PROXY_PORT", "not-a-port");

    let mut config = ManagerConfig::default();
    let result = config.apply_env();
    clear_env();

    assert!(result.is_err(), "A bad port should be rejected");
}

/// Test source layering: file first, environment on top
#[test]
#[serial]
fn test_load_layers_sources() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config_path = dir.path().join("config.json");
    fs::write(
        &config_path,
        r#"{ "log_level": "warn", "http_proxy": { "port": 8080 } }"#,
    )
    .expect("Failed to write test config file");

    clear_env();
    env::set_var("ANON_ROUTER_LOG_LEVEL", "error");

    let config = ManagerConfig::load(Some(&config_path)).expect("Failed to load config");
    clear_env();

    // Environment wins over the file; file wins over defaults.
    assert_eq!(config.log_level, "error");
    assert_eq!(config.http_proxy.port, 8080);
    assert_eq!(config.https_proxy.listen, "127.0.0.1");
}

/// Test that load rejects an invalid layered result
#[test]
#[serial]
fn test_load_validates() {
    clear_env();
    // Collide the HTTPS proxy with the HTTP default.
    env::set_var("ANON_ROUTER_HTTPS_PROXY_PORT", "4444");

    let result = ManagerConfig::load(None);
    clear_env();

    assert!(result.is_err(), "Colliding proxy bindings should be rejected");
}
