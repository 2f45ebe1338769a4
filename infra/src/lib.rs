//! # Infrastructure Layer
//!
//! Concrete implementations of the interfaces declared in `pw_core`:
//!
//! - **Cache**: Redis client with retry logic, and the revocation stores
//!   (Redis-backed and in-process)
//! - **HTTP**: client for the auth service refresh endpoint

use pw_core::errors::DomainError;

/// Cache module - Redis client and revocation stores
pub mod cache;

/// HTTP module - outbound calls to other services
pub mod http;

pub use cache::{InMemoryRevocationStore, RedisClient, RedisRevocationStore};
pub use http::HttpTokenRefresher;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP client error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Config(message) => DomainError::Configuration { message },
            other => DomainError::Storage {
                message: other.to_string(),
            },
        }
    }
}
