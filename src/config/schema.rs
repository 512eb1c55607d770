//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits and every field has a default, so a partial
//! settings tree is always valid input.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Liveness probe path.
pub const LIVENESS_PATH: &str = "/livez";

/// Readiness probe path.
pub const READINESS_PATH: &str = "/readyz";

/// Legacy health probe path, deprecated since Kubernetes 1.16.
pub const LEGACY_HEALTH_PATH: &str = "/healthz";

/// Path of the runtime configuration document.
pub const CONFIG_PATH: &str = "/config.json";

/// Document served in place of missing content when fallback is enabled.
pub const INDEX_FILE: &str = "index.html";

/// Root configuration for the static server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StaticConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Content directory and resolution policy.
    pub content: ContentConfig,

    /// Probe and runtime-configuration endpoints.
    pub endpoints: EndpointConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Content configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory to serve. Read-only for the lifetime of the process.
    pub dir: PathBuf,

    /// Serve `index.html` for any path that does not exist.
    pub fallback_to_index: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            fallback_to_index: false,
        }
    }
}

/// Auxiliary endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Register `/livez`, `/readyz` and `/healthz`.
    pub health_checks: bool,

    /// Register `/config.json`.
    pub config_variables: bool,

    /// Comma separated environment variable names exposed in `/config.json`.
    pub config_variable_names: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            health_checks: true,
            config_variables: true,
            config_variable_names: String::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit one access log line per content request.
    pub access_log: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,

    /// HTTP path the metrics are exported on.
    pub metrics_path: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            access_log: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
            metrics_path: "/metrics".to_string(),
        }
    }
}
