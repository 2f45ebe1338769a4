//! Authentication configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{parsed_or, required, ConfigError};

/// JWT authentication configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared HS256 secret used for signing and verification
    pub secret: String,

    /// Access token lifetime in minutes
    pub access_token_ttl_minutes: u64,

    /// Refresh token lifetime in minutes
    pub refresh_token_ttl_minutes: u64,
}

impl JwtConfig {
    /// Create a new JWT configuration with secret and default lifetimes
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_ttl_minutes: 30,
            refresh_token_ttl_minutes: 1440,
        }
    }

    /// Set access token lifetime in minutes
    pub fn with_access_ttl_minutes(mut self, minutes: u64) -> Self {
        self.access_token_ttl_minutes = minutes;
        self
    }

    /// Set refresh token lifetime in minutes
    pub fn with_refresh_ttl_minutes(mut self, minutes: u64) -> Self {
        self.refresh_token_ttl_minutes = minutes;
        self
    }

    pub fn access_token_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_ttl_minutes.saturating_mul(60))
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_token_ttl_minutes.saturating_mul(60))
    }

    pub(crate) fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            secret: required(lookup, "JWT_SECRET_KEY")?,
            access_token_ttl_minutes: parsed_or(lookup, "ACCESS_TOKEN_TTL_MINUTES", 30)?,
            refresh_token_ttl_minutes: parsed_or(lookup, "REFRESH_TOKEN_TTL_MINUTES", 1440)?,
        })
    }
}

// The secret never reaches logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"****")
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("refresh_token_ttl_minutes", &self.refresh_token_ttl_minutes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_access_ttl_minutes(15)
            .with_refresh_ttl_minutes(60);

        assert_eq!(config.access_token_ttl(), Duration::from_secs(900));
        assert_eq!(config.refresh_token_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let config = JwtConfig::new("my-secret")
            .with_access_ttl_minutes(u64::MAX)
            .with_refresh_ttl_minutes(u64::MAX / 2);

        assert_eq!(config.access_token_ttl(), Duration::from_secs(u64::MAX));
        assert_eq!(config.refresh_token_ttl(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_debug_masks_secret() {
        let rendered = format!("{:?}", JwtConfig::new("top-secret-value"));
        assert!(!rendered.contains("top-secret-value"));
        assert!(rendered.contains("****"));
    }
}
