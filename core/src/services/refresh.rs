//! Outbound refresh exchange used by the gateway

use async_trait::async_trait;

use crate::errors::RefreshExchangeError;

/// Trades a refresh token for a fresh access token at the auth service
///
/// The gateway never mints tokens itself; it only validates what this call
/// returns before accepting it.
#[async_trait]
pub trait RefreshExchange: Send + Sync {
    /// Returns the new access token string
    async fn exchange(&self, refresh_token: &str) -> Result<String, RefreshExchangeError>;
}
