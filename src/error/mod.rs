// Error types for the cachegate gateway
// Author: kelexine (https://github.com/kelexine)

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status} for {uri}: {body}")]
    Status {
        uri: String,
        status: u16,
        body: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// Raised in audit mode when a resource that should already have been
    /// cached reaches the network.
    #[error("Not allowed to fetch {key}. Should already be in the cache.")]
    AuditViolation { key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// True for the audit-mode failure, which tests must never swallow.
    pub fn is_audit_violation(&self) -> bool {
        matches!(self, GatewayError::AuditViolation { .. })
    }

    /// HTTP status of an upstream failure, if the upstream answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            GatewayError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
