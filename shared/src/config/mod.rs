//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing secret and token lifetimes
//! - `cache` - Revocation store backend and Redis connection
//! - `environment` - Logging configuration
//! - `server` - HTTP bind address and the gateway's refresh exchange

pub mod auth;
pub mod cache;
pub mod environment;
pub mod server;

use std::str::FromStr;

use thiserror::Error;

pub use auth::JwtConfig;
pub use cache::{CacheConfig, RevocationBackend};
pub use environment::LoggingConfig;
pub use server::{GatewayConfig, ServerConfig};

/// Startup configuration errors. These are fatal; nothing here is per-request.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("critical config missing: {key}")]
    Missing { key: String },

    #[error("invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Revocation store configuration
    pub cache: CacheConfig,

    /// Refresh exchange configuration used by the gateway middleware
    pub gateway: GatewayConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file is loaded first when present (local development).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = ServerConfig::from_lookup(&lookup)?;
        let gateway = GatewayConfig::from_lookup(&lookup, &server)?;

        Ok(Self {
            jwt: JwtConfig::from_lookup(&lookup)?,
            cache: CacheConfig::from_lookup(&lookup)?,
            logging: LoggingConfig::from_lookup(&lookup),
            server,
            gateway,
        })
    }
}

/// Read a required, non-empty variable.
pub(crate) fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing {
            key: key.to_string(),
        }),
    }
}

/// Read and parse an optional variable, falling back to `default` when unset.
pub(crate) fn parsed_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value: raw,
        }),
    }
}
