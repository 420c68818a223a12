//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML config
//! files, with defaults so a missing file or section still yields a
//! runnable server.

use std::net::{AddrParseError, SocketAddr};

use serde::{Deserialize, Serialize};

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, port).
    pub listener: ListenerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Value emitted in the `Server` response header.
    pub server_token: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            observability: ObservabilityConfig::default(),
            server_token: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (all interfaces by default).
    pub bind_address: String,

    /// Port to listen on. Port 0 picks an ephemeral port.
    pub port: u16,
}

impl ListenerConfig {
    /// The combined socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.bind_address, self.port).parse()
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0");
        assert_eq!(config.listener.port, 8080);
        assert_eq!(
            config.listener.socket_addr().unwrap(),
            "0.0.0.0:8080".parse().unwrap()
        );
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [listener]
            port = 9000
            "#,
        )
        .unwrap();
        assert_eq!(config.listener.port, 9000);
        assert_eq!(config.listener.bind_address, "0.0.0.0");
        assert_eq!(config.observability.log_level, "info");
        assert!(config.server_token.starts_with("oneshot-http/"));
    }

    #[test]
    fn bad_bind_address_fails_socket_addr() {
        let listener = ListenerConfig {
            bind_address: "not-an-ip".to_string(),
            port: 80,
        };
        assert!(listener.socket_addr().is_err());
    }
}
