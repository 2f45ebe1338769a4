//! Shared configuration and response types for the PersonalWebSite services
//!
//! This crate provides functionality used across every server module:
//! - Environment-driven configuration (JWT, revocation cache, server, logging)
//! - The JSON error response returned by all HTTP endpoints
//! - Common error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, ConfigError, GatewayConfig, JwtConfig, LoggingConfig,
    RevocationBackend, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
