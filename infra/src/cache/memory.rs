//! Process-local refresh token denylist
//!
//! Only suitable for a single instance: markers are not shared and vanish on
//! restart. Expired markers are dropped lazily on access.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use pw_core::errors::DomainError;
use pw_core::repositories::RevocationStore;

#[derive(Debug, Default)]
pub struct InMemoryRevocationStore {
    /// Token string to the instant its marker expires
    entries: RwLock<HashMap<String, Instant>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining TTL of the marker for `token`, if one is live
    pub async fn ttl_of(&self, token: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(token)
            .filter(|deadline| **deadline > now)
            .map(|deadline| *deadline - now)
    }

    /// Number of live markers
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|deadline| **deadline > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, token: &str, ttl: Duration) -> Result<(), DomainError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, deadline| *deadline > now);
        entries.insert(token.to_string(), now + ttl);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        Ok(self.ttl_of(token).await.is_some())
    }
}
