//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DomainError {
    /// Upstream failure carrying the HTTP status and response body
    pub fn upstream_status(service: &str, status: u16, body: &str) -> Self {
        Self::ExternalService(format!("{service} returned {status}: {body}"))
    }
}
