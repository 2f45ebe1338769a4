//! Revocation store configuration

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{parsed_or, ConfigError};

/// Which revocation backend the token manager is built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationBackend {
    /// Redis-backed denylist shared by all instances
    Redis,
    /// Process-local denylist (single instance, development)
    Memory,
    /// No revocation capability (gateway-only deployments)
    None,
}

impl FromStr for RevocationBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            "none" | "disabled" => Ok(Self::None),
            other => Err(format!("unknown revocation backend: {}", other)),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Revocation backend
    pub backend: RevocationBackend,

    /// Redis connection URL
    pub url: String,

    /// Namespace prepended to every revocation key
    pub key_prefix: String,

    /// Maximum retry attempts for a Redis operation
    pub max_retries: u32,

    /// Base delay between retries in milliseconds (exponential backoff)
    pub retry_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: RevocationBackend::Redis,
            url: String::from("redis://localhost:6379"),
            key_prefix: String::from("jwt:blacklist"),
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all revocation keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.key_prefix, key)
        }
    }

    pub(crate) fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            backend: parsed_or(lookup, "REVOCATION_BACKEND", defaults.backend)?,
            url: lookup("REDIS_URL").unwrap_or(defaults.url),
            key_prefix: lookup("REVOCATION_KEY_PREFIX").unwrap_or(defaults.key_prefix),
            max_retries: parsed_or(lookup, "REDIS_MAX_RETRIES", defaults.max_retries)?,
            retry_delay_ms: parsed_or(lookup, "REDIS_RETRY_DELAY_MS", defaults.retry_delay_ms)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.backend, RevocationBackend::Redis);
        assert_eq!(config.make_key("abc.def.ghi"), "jwt:blacklist:abc.def.ghi");
    }

    #[test]
    fn test_cache_key_without_prefix() {
        let config = CacheConfig::new("redis://cache:6379").with_prefix("");
        assert_eq!(config.make_key("token"), "token");
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("Redis".parse::<RevocationBackend>(), Ok(RevocationBackend::Redis));
        assert_eq!("memory".parse::<RevocationBackend>(), Ok(RevocationBackend::Memory));
        assert_eq!("disabled".parse::<RevocationBackend>(), Ok(RevocationBackend::None));
        assert!("etcd".parse::<RevocationBackend>().is_err());
    }
}
