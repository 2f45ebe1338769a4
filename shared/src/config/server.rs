//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{parsed_or, ConfigError};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
            workers: 0,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub(crate) fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("SERVER_HOST").unwrap_or(defaults.host),
            port: parsed_or(lookup, "SERVER_PORT", defaults.port)?,
            workers: parsed_or(lookup, "SERVER_WORKERS", defaults.workers)?,
        })
    }
}

/// Gateway configuration for the transparent refresh exchange
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Base URL of the auth service; `/refresh` is appended
    pub auth_service_url: String,

    /// Upper bound for one refresh exchange, in seconds
    pub refresh_timeout_secs: u64,
}

impl GatewayConfig {
    pub fn new(auth_service_url: impl Into<String>) -> Self {
        Self {
            auth_service_url: auth_service_url.into(),
            refresh_timeout_secs: 3,
        }
    }

    /// Full URL of the refresh endpoint
    pub fn refresh_url(&self) -> String {
        format!("{}/refresh", self.auth_service_url.trim_end_matches('/'))
    }

    pub(crate) fn from_lookup<F>(lookup: &F, server: &ServerConfig) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth_service_url = lookup("AUTH_SERVICE_URL")
            .unwrap_or_else(|| format!("http://127.0.0.1:{}/api/v1/auth", server.port));
        Ok(Self {
            auth_service_url,
            refresh_timeout_secs: parsed_or(lookup, "REFRESH_TIMEOUT_SECS", 3)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig::new("0.0.0.0", 9000);
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_refresh_url_trims_trailing_slash() {
        let config = GatewayConfig::new("http://auth:8081/");
        assert_eq!(config.refresh_url(), "http://auth:8081/refresh");

        let config = GatewayConfig::new("http://auth:8081");
        assert_eq!(config.refresh_url(), "http://auth:8081/refresh");
    }
}
