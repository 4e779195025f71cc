//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address, port).
    pub listener: ListenerConfig,

    /// The single backend origin requests are forwarded to.
    pub backend: BackendConfig,

    /// Which paths are forwarded instead of served from disk.
    pub routing: RoutingConfig,

    /// Static file serving.
    pub static_files: StaticFilesConfig,

    /// Error pages rendered when the backend cannot be reached.
    pub fallback: FallbackConfig,

    /// Body limits and CORS.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl RelayConfig {
    /// Socket address string the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.bind_address, self.listener.port)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub bind_address: String,

    /// Port to listen on. The `PORT` environment variable takes precedence.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Backend origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend (`scheme://host:port`).
    pub base_url: String,

    /// Deadline for the whole backend exchange in seconds.
    pub timeout_secs: u64,

    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

/// Path routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Path prefixes forwarded to the backend, checked in order.
    pub forward_prefixes: Vec<String>,

    /// Forward a bare prefix path (e.g. `/admin`) as `/admin?`.
    pub append_query_to_bare_prefix: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            forward_prefixes: vec!["/admin".to_string(), "/api/".to_string()],
            append_query_to_bare_prefix: false,
        }
    }
}

/// Static file configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory served for every path that is not forwarded.
    pub root: String,

    /// Add `X-Content-Type-Options`, `X-Frame-Options` and `X-XSS-Protection`.
    pub security_headers: bool,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            security_headers: true,
        }
    }
}

/// Error fallback configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Login page linked from the "cannot connect" page.
    pub login_path: String,

    /// Paths under these prefixes get JSON error bodies instead of HTML.
    pub json_prefixes: Vec<String>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            login_path: "/admin/login".to_string(),
            json_prefixes: vec!["/api/".to_string()],
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
    /// Add `Access-Control-Allow-Origin: *` to relayed responses.
    pub cors_allow_any_origin: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
            cors_allow_any_origin: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Prometheus scrape endpoint; disabled when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_address: None,
        }
    }
}
