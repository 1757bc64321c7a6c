//! Configuration for the drawflow HTTP server.

use std::net::SocketAddr;

use serde::Deserialize;

use drawflow_core::DrawflowError;

/// Top-level server configuration.
///
/// Loaded from `drawflow.toml` `[server]` section or
/// `DRAWFLOW__SERVER__` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Drop all database data at startup before declaring the schema.
    ///
    /// On by default: every restart starts from an empty editor. Disable for
    /// any deployment that must keep the document across restarts.
    #[serde(default = "default_true")]
    pub reset_on_startup: bool,

    /// `Access-Control-Max-Age` for CORS preflight responses.
    #[serde(default = "default_cors_max_age")]
    pub cors_max_age_secs: u64,
}

impl ServerConfig {
    /// The address to bind, validated.
    pub fn socket_addr(&self) -> Result<SocketAddr, DrawflowError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| DrawflowError::InvalidConfig {
                key: "server.host".to_string(),
                reason: format!("{e}"),
            })
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_true() -> bool {
    true
}

fn default_cors_max_age() -> u64 {
    300
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            reset_on_startup: default_true(),
            cors_max_age_secs: default_cors_max_age(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert!(config.reset_on_startup);
        assert_eq!(config.cors_max_age_secs, 300);
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_invalid_host_rejected() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        let err = config.socket_addr().unwrap_err();
        assert!(matches!(err, DrawflowError::InvalidConfig { .. }));
    }
}
