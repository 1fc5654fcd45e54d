//! Configuration module
//!
//! This module handles manager configuration, including loading from a JSON
//! file and from environment variables, and validating the configuration.

// Submodules
mod defaults;

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::net::parse_bind_addr;
use crate::common::{ManagerError, Result};
use crate::router::ProxyKind;

// Export constants needed externally
pub use defaults::{ENV_PREFIX, TUNNEL_PROFILE};
pub use defaults::{HTTP_PROXY_PORT, HTTPS_PROXY_PORT, PROXY_LISTEN_STR};

/// Listener settings for one proxy kind
///
/// A port of `0` means "use the conventional port for the kind"
/// (4444 for HTTP, 4447 for HTTPS).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[serde(default)]
pub struct ProxyListenConfig {
    /// Listen address for the proxy listener
    pub listen: String,

    /// Listen port for the proxy listener
    pub port: u16,
}

impl Default for ProxyListenConfig {
    fn default() -> Self {
        Self {
            listen: defaults::proxy_listen(),
            port: 0,
        }
    }
}

/// Manager configuration
///
/// Contains the defaults the lifecycle manager falls back to when a caller
/// does not specify a data directory or proxy bind parameters explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[serde(default)]
pub struct ManagerConfig {
    /// Engine data directory passed to the engine at initialization
    pub data_dir: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,

    /// HTTP proxy listener settings
    pub http_proxy: ProxyListenConfig,

    /// HTTPS proxy listener settings
    pub https_proxy: ProxyListenConfig,
}

impl Default for ManagerConfig {
    /// Create a default configuration using centralized defaults
    fn default() -> Self {
        Self {
            data_dir: defaults::data_dir(),
            log_level: defaults::log_level(),
            http_proxy: ProxyListenConfig {
                listen: defaults::proxy_listen(),
                port: defaults::http_proxy_port(),
            },
            https_proxy: ProxyListenConfig {
                listen: defaults::proxy_listen(),
                port: defaults::https_proxy_port(),
            },
        }
    }
}

impl ManagerConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        serde_json::from_str(&content).map_err(|e| {
            ManagerError::Config(format!(
                "Failed to parse configuration file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load configuration, layering sources
    ///
    /// Starts from defaults, applies the given file when present, then
    /// applies `ANON_ROUTER_`-prefixed environment variables, and finally
    /// validates the result.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Recognized variables: `ANON_ROUTER_DATA_DIR`, `ANON_ROUTER_LOG_LEVEL`,
    /// `ANON_ROUTER_HTTP_PROXY_LISTEN`, `ANON_ROUTER_HTTP_PROXY_PORT`,
    /// `ANON_ROUTER_HTTPS_PROXY_LISTEN`, `ANON_ROUTER_HTTPS_PROXY_PORT`.
    pub fn apply_env(&mut self) -> Result<()> {
        let get_env = |name: &str| -> Option<String> {
            env::var(format!("{}{}", ENV_PREFIX, name)).ok()
        };

        if let Some(data_dir) = get_env("DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }

        if let Some(log_level) = get_env("LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(listen) = get_env("HTTP_PROXY_LISTEN") {
            self.http_proxy.listen = listen;
        }

        if let Some(port) = get_env("HTTP_PROXY_PORT") {
            self.http_proxy.port = parse_port(&port, "HTTP_PROXY_PORT")?;
        }

        if let Some(listen) = get_env("HTTPS_PROXY_LISTEN") {
            self.https_proxy.listen = listen;
        }

        if let Some(port) = get_env("HTTPS_PROXY_PORT") {
            self.https_proxy.port = parse_port(&port, "HTTPS_PROXY_PORT")?;
        }

        Ok(())
    }

    /// Validate the configuration
    ///
    /// Checks that both proxy listen addresses are usable and that the two
    /// listeners do not collide on the same address and port.
    pub fn validate(&self) -> Result<()> {
        let http = self.proxy_defaults(ProxyKind::Http);
        let https = self.proxy_defaults(ProxyKind::Https);

        let http_addr = parse_bind_addr(&http.0, http.1)?;
        let https_addr = parse_bind_addr(&https.0, https.1)?;

        if http_addr == https_addr {
            return Err(ManagerError::Config(format!(
                "HTTP and HTTPS proxies cannot share the bind address {}",
                http_addr
            )));
        }

        Ok(())
    }

    /// Bind defaults for one proxy kind
    ///
    /// Returns the configured listen address and port, with a configured
    /// port of `0` resolved to the conventional port for the kind.
    pub fn proxy_defaults(&self, kind: ProxyKind) -> (String, u16) {
        let settings = match kind {
            ProxyKind::Http => &self.http_proxy,
            ProxyKind::Https => &self.https_proxy,
        };

        let port = if settings.port == 0 {
            kind.default_port()
        } else {
            settings.port
        };

        (settings.listen.clone(), port)
    }
}

fn parse_port(value: &str, name: &str) -> Result<u16> {
    value.parse::<u16>().map_err(|e| {
        ManagerError::Config(format!("Invalid {}{}: {}", ENV_PREFIX, name, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ManagerConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.http_proxy.listen, "127.0.0.1");
        assert_eq!(config.http_proxy.port, 4444);
        assert_eq!(config.https_proxy.port, 4447);
    }

    #[test]
    fn test_proxy_defaults_resolution() {
        let mut config = ManagerConfig::default();
        config.http_proxy.port = 0;
        config.https_proxy.port = 0;

        // A configured port of zero resolves to the conventional port.
        assert_eq!(config.proxy_defaults(ProxyKind::Http), ("127.0.0.1".to_string(), 4444));
        assert_eq!(config.proxy_defaults(ProxyKind::Https), ("127.0.0.1".to_string(), 4447));

        config.http_proxy.port = 8080;
        assert_eq!(config.proxy_defaults(ProxyKind::Http).1, 8080);
    }

    #[test]
    fn test_parse_json_config() {
        let config: ManagerConfig = serde_json::from_str(
            r#"{
                "data_dir": "/var/lib/router",
                "log_level": "debug",
                "http_proxy": { "listen": "0.0.0.0", "port": 8080 }
            }"#,
        )
        .expect("Should parse a valid configuration");

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/router"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.http_proxy.listen, "0.0.0.0");
        assert_eq!(config.http_proxy.port, 8080);
        // Untouched sections keep their defaults
        assert_eq!(config.https_proxy.listen, "127.0.0.1");
        assert_eq!(config.proxy_defaults(ProxyKind::Https).1, 4447);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: std::result::Result<ManagerConfig, _> =
            serde_json::from_str(r#"{ "bandwidth": "unlimited" }"#);
        assert!(result.is_err(), "Unknown fields should be rejected");
    }

    #[test]
    fn test_validate_rejects_colliding_proxies() {
        let mut config = ManagerConfig::default();
        config.https_proxy.port = config.http_proxy.port;

        assert!(config.validate().is_err(), "Shared bind address should be rejected");
    }

    #[test]
    fn test_validate_rejects_bad_listen_address() {
        let mut config = ManagerConfig::default();
        config.http_proxy.listen = "not an address".to_string();

        assert!(config.validate().is_err());
    }
}
