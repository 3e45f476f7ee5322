//! Configuration data structures for cachegate.
//!
//! This module defines the schema for the application settings: the
//! upstream REST client, the response cache, fetch auditing and logging.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::cache::CacheConfig;
use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Upstream REST API settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Response cache sizing and lifetime.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Fetch auditing settings.
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the upstream REST API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL that relative request URIs are resolved against.
    /// Default: empty (only absolute URIs accepted)
    #[serde(default)]
    pub base_url: String,

    /// User name for HTTP basic authentication.
    #[serde(default)]
    pub username: Option<String>,

    /// Password for HTTP basic authentication.
    #[serde(default)]
    pub password: Option<String>,

    /// Request timeout in seconds.
    /// Default: `30`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Connection timeout in seconds.
    /// Default: `10`
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// Maximum number of idle connections kept per host.
    /// Default: `10`
    #[serde(default = "default_pool_size")]
    pub pool_max_idle_per_host: usize,
}

/// Settings for fetch auditing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuditConfig {
    /// Whether uncached fetches are audited.
    /// Default: `false`
    #[serde(default)]
    pub enabled: bool,

    /// URIs allowed to reach the upstream API while auditing.
    #[serde(default)]
    pub allowed_uris: Vec<String>,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: None,
            password: None,
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            pool_max_idle_per_host: default_pool_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_pool_size() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
