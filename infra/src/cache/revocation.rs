//! Redis-backed refresh token denylist

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use pw_core::errors::DomainError;
use pw_core::repositories::RevocationStore;
use pw_shared::CacheConfig;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Value stored under every revocation key
pub const REVOKED_MARKER: &str = "revoked";

/// Revocation store shared by every instance through Redis
///
/// A revoked token lives under `<prefix>:<token>` with value
/// [`REVOKED_MARKER`] until its TTL elapses.
#[derive(Clone)]
pub struct RedisRevocationStore {
    client: RedisClient,
    config: CacheConfig,
}

impl RedisRevocationStore {
    pub fn new(client: RedisClient, config: CacheConfig) -> Self {
        Self { client, config }
    }

    /// Connect to Redis and build the store in one step
    pub async fn connect(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let client = RedisClient::new(&config).await?;
        Ok(Self::new(client, config))
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    /// Full Redis key for a token
    pub fn key_for(&self, token: &str) -> String {
        self.config.make_key(token)
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, token: &str, ttl: Duration) -> Result<(), DomainError> {
        self.client
            .set_with_ttl(&self.key_for(token), REVOKED_MARKER, ttl)
            .await?;
        debug!(ttl_ms = ttl.as_millis() as u64, "revocation marker written");
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(&self.key_for(token)).await?)
    }
}
