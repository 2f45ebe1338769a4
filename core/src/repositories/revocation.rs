//! Revocation store trait defining the denylist used for refresh tokens.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::DomainError;

/// TTL-capable key-value denylist for refresh tokens
///
/// The only write is "set with TTL" and the only read is an existence check;
/// both are atomic at the store, so callers need no locking. Implementations
/// own key namespacing.
///
/// Errors must be surfaced as [`DomainError::Storage`]. An unreachable store
/// is never reported as "not revoked".
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Mark `token` as revoked for `ttl`
    ///
    /// # Arguments
    /// * `token` - The refresh token string
    /// * `ttl` - How long the marker lives; never longer than the token's
    ///   remaining lifetime
    async fn revoke(&self, token: &str, ttl: Duration) -> Result<(), DomainError>;

    /// Check whether a marker exists for `token`
    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError>;
}

#[async_trait]
impl<T: RevocationStore + ?Sized> RevocationStore for std::sync::Arc<T> {
    async fn revoke(&self, token: &str, ttl: Duration) -> Result<(), DomainError> {
        (**self).revoke(token, ttl).await
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        (**self).is_revoked(token).await
    }
}
