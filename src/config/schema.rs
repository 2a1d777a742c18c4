//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay and
//! its companion binaries. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};

/// Root configuration shared by the proxy, origin server and test client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Proxy listener configuration.
    pub listener: ListenerConfig,

    /// Upstream relay settings.
    pub relay: RelayConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Origin file server settings.
    pub origin: OriginConfig,

    /// Test client settings.
    pub client: ClientConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:9090").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// HTTP relay configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Size of each chunk copied from upstream to client.
    pub buffer_size: usize,

    /// Port used when the target URL names none.
    pub default_port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            buffer_size: 4096,
            default_port: 80,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Emit logs as JSON lines instead of the compact format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Origin file server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OriginConfig {
    /// Bind address for the file server.
    pub bind_address: String,

    /// Directory files are served from.
    pub root: String,

    /// File served for an empty request path.
    pub index_file: String,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:80".to_string(),
            root: "webroot".to_string(),
            index_file: "index.html".to_string(),
        }
    }
}

/// Test client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Address of the proxy the client talks to.
    pub proxy_address: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            proxy_address: "127.0.0.1:9090".to_string(),
        }
    }
}
