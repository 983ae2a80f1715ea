//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the frontend gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream API origin settings.
    pub upstream: UpstreamConfig,

    /// Static asset serving for non-API requests.
    pub assets: AssetConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:4321").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:4321".to_string(),
        }
    }
}

/// Upstream API origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the backend API server.
    ///
    /// Overridden by the `API_SERVER_URL` environment variable when set.
    pub url: String,
}

impl UpstreamConfig {
    /// The origin with any trailing slashes removed, suitable for joining
    /// with a request's path-and-query.
    pub fn origin(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5100".to_string(),
        }
    }
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory served for requests that are not forwarded upstream.
    pub dir: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            dir: "dist".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
