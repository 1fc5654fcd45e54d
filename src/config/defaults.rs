//! Default configuration values
//!
//! This module provides default values for configuration options.
//! It is designed to be a single source of truth for defaults,
//! making it easier to maintain consistent defaults across the crate.

use std::path::PathBuf;

/// Environment variable prefix for all configuration options
pub const ENV_PREFIX: &str = "ANON_ROUTER_";

/// Tunnel profile tag passed to the engine at initialization
pub const TUNNEL_PROFILE: &str = "tunnel";

// String constants for default values

/// Default proxy listen address as string
pub const PROXY_LISTEN_STR: &str = "127.0.0.1";

/// Default engine data directory as string
pub const DATA_DIR_STR: &str = ".";

/// Default log level as string
pub const LOG_LEVEL_STR: &str = "info";

/// Default HTTP proxy port
pub const HTTP_PROXY_PORT: u16 = 4444;

/// Default HTTPS proxy port
pub const HTTPS_PROXY_PORT: u16 = 4447;

// Functions for default values

/// Default proxy listen address
pub fn proxy_listen() -> String {
    PROXY_LISTEN_STR.to_string()
}

/// Default engine data directory
pub fn data_dir() -> PathBuf {
    PathBuf::from(DATA_DIR_STR)
}

/// Default log level
pub fn log_level() -> String {
    LOG_LEVEL_STR.to_string()
}

/// Default HTTP proxy port
pub fn http_proxy_port() -> u16 {
    HTTP_PROXY_PORT
}

/// Default HTTPS proxy port
pub fn https_proxy_port() -> u16 {
    HTTPS_PROXY_PORT
}
