//! Configuration types for the poultry record system
//!
//! This module defines the configuration structures used by the daemon and
//! embedders. The daemon fills them from environment variables.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Default listen address (the port the web front-end expects)
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

/// Upper bound on the shutdown grace period
pub const MAX_SHUTDOWN_GRACE_SECS: u64 = 300;

/// Default path for the file store
pub const DEFAULT_STORE_PATH: &str = "data/poultry.json";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoultryConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Record store configuration
    #[serde(default)]
    pub store: StoreConfig,
}

impl PoultryConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.server.validate()?;
        self.store.validate()?;
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind, e.g. "0.0.0.0:3000"
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Seconds to wait for in-flight requests on shutdown
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
}

impl ServerConfig {
    /// Validate the server configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.socket_addr()?;
        if self.shutdown_grace_secs > MAX_SHUTDOWN_GRACE_SECS {
            return Err(crate::Error::config(format!(
                "Shutdown grace must be at most {} seconds. Got: {}",
                MAX_SHUTDOWN_GRACE_SECS, self.shutdown_grace_secs
            )));
        }
        Ok(())
    }

    /// Parse the listen address
    pub fn socket_addr(&self) -> Result<SocketAddr, crate::Error> {
        self.listen_addr.parse().map_err(|e| {
            crate::Error::config(format!(
                "Invalid listen address '{}': {}",
                self.listen_addr, e
            ))
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            shutdown_grace_secs: default_shutdown_grace_secs(),
        }
    }
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

fn default_shutdown_grace_secs() -> u64 {
    10
}

/// Record store configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreConfig {
    /// JSON document file with atomic writes
    File {
        /// Path to the store file
        path: String,
    },

    /// In-memory store (not persistent)
    #[default]
    Memory,
}

impl StoreConfig {
    /// Validate the store configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            StoreConfig::File { path } if path.trim().is_empty() => {
                Err(crate::Error::config("File store path cannot be empty"))
            }
            _ => Ok(()),
        }
    }

    /// Registry key of the store type
    pub fn type_name(&self) -> &'static str {
        match self {
            StoreConfig::File { .. } => "file",
            StoreConfig::Memory => "memory",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PoultryConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.socket_addr().unwrap().port(), 3000);
        assert_eq!(config.store, StoreConfig::Memory);
    }

    #[test]
    fn rejects_bad_listen_addr_and_empty_path() {
        let mut config = PoultryConfig::new();
        config.server.listen_addr = "localhost".to_string();
        assert!(config.validate().is_err());

        let config = PoultryConfig {
            store: StoreConfig::File {
                path: "  ".to_string(),
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));
    }

    #[test]
    fn rejects_shutdown_grace_over_limit() {
        let mut config = PoultryConfig::new();
        config.server.shutdown_grace_secs = MAX_SHUTDOWN_GRACE_SECS;
        assert!(config.validate().is_ok());

        config.server.shutdown_grace_secs = MAX_SHUTDOWN_GRACE_SECS + 1;
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));
    }

    #[test]
    fn store_config_is_tagged() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"type":"file","path":"/tmp/p.json"}"#).unwrap();
        assert_eq!(config.type_name(), "file");
    }
}
