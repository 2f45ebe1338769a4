//! Token manager interface and its two deployment variants

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn, Instrument, Span};

use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationStore;

use super::signer::TokenSigner;

/// Central authority for the credential lifecycle.
///
/// Two variants exist, chosen at construction time:
/// [`StatelessTokenManager`] (no revocation capability, gateway mode) and
/// [`RevocableTokenManager`] (refresh tokens checked against a
/// [`RevocationStore`]). Call sites hold `Arc<dyn TokenManager>` and never
/// branch on which one they got.
///
/// Access tokens are stateless: validating one never touches the store.
#[async_trait]
pub trait TokenManager: Send + Sync {
    /// Keys and validation rules shared by both variants
    fn signer(&self) -> &TokenSigner;

    /// Span every operation of this manager is recorded under
    fn span(&self) -> &Span;

    /// Whether `revoke_token` can succeed on this variant
    fn supports_revocation(&self) -> bool;

    /// Issues an access/refresh pair with identical principal claims
    ///
    /// Each token gets `exp = now + ttl` for its own TTL. Fails only when
    /// signing fails.
    fn generate_token(
        &self,
        user_id: u64,
        username: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<TokenPair, DomainError> {
        self.span().in_scope(|| {
            let now = Utc::now();
            let (access_token, access) = self.signer().issue(user_id, username, access_ttl, now)?;
            let (refresh_token, refresh) =
                self.signer().issue(user_id, username, refresh_ttl, now)?;

            debug!(user_id, access_exp = access.exp, refresh_exp = refresh.exp, "issued token pair");

            Ok(TokenPair {
                access_token,
                refresh_token,
                access_expires_at: access.exp,
                refresh_expires_at: refresh.exp,
            })
        })
    }

    /// Mints a new access token from a valid, unrevoked refresh token
    ///
    /// The refresh token is not rotated here.
    async fn refresh_token(
        &self,
        refresh_token: &str,
        access_ttl: Duration,
    ) -> Result<String, DomainError> {
        let claims = self.validate_refresh_token(refresh_token).await?;

        let span = self.span().clone();
        span.in_scope(|| {
            let (token, access) =
                self.signer()
                    .issue(claims.user_id, &claims.username, access_ttl, Utc::now())?;
            debug!(user_id = claims.user_id, access_exp = access.exp, "issued access token from refresh token");
            Ok(token)
        })
    }

    /// Verifies signature and expiry only
    ///
    /// # Returns
    ///
    /// * `Err(TokenError::TokenExpired)` - The only error that may trigger a refresh
    /// * `Err(TokenError::InvalidToken)` - Malformed or badly signed
    fn validate_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.span().in_scope(|| {
            self.signer().verify(token, Utc::now()).map_err(|e| {
                debug!(kind = %TokenKind::Access, error = %e, "token rejected");
                DomainError::Token(e)
            })
        })
    }

    /// Checks the revocation store, then verifies signature and expiry
    async fn validate_refresh_token(&self, token: &str) -> Result<Claims, DomainError>;

    /// Revokes a refresh token until it would have expired anyway
    ///
    /// The marker lives for `min(ttl_override, remaining lifetime)`, or the
    /// remaining lifetime when `ttl_override` is zero. Revoking a token that
    /// already expired naturally is a successful no-op.
    async fn revoke_token(&self, token: &str, ttl_override: Duration) -> Result<(), DomainError>;

    /// Existence check against the revocation store
    async fn is_token_revoked(&self, token: &str) -> Result<bool, DomainError>;
}

/// TTL of a revocation marker: never longer than the token's remaining lifetime
pub fn revocation_ttl(ttl_override: Duration, remaining: Duration) -> Duration {
    if ttl_override.is_zero() || ttl_override > remaining {
        remaining
    } else {
        ttl_override
    }
}

/// Token manager without revocation capability
///
/// Used by deployments that only validate (the gateway). Refresh tokens are
/// never reported revoked and revocation requests are configuration errors.
#[derive(Debug)]
pub struct StatelessTokenManager {
    signer: TokenSigner,
    span: Span,
}

impl StatelessTokenManager {
    /// Creates a manager from the shared secret
    ///
    /// # Returns
    ///
    /// * `Err(DomainError::Configuration)` - The secret is empty
    pub fn new(secret: &str) -> Result<Self, DomainError> {
        Ok(Self {
            signer: TokenSigner::new(secret)?,
            span: tracing::info_span!("token_manager", revocation = false),
        })
    }

    /// Record this manager's events under `span` instead of the default one
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

#[async_trait]
impl TokenManager for StatelessTokenManager {
    fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    fn span(&self) -> &Span {
        &self.span
    }

    fn supports_revocation(&self) -> bool {
        false
    }

    async fn validate_refresh_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.span.in_scope(|| {
            self.signer.verify(token, Utc::now()).map_err(|e| {
                debug!(kind = %TokenKind::Refresh, error = %e, "token rejected");
                DomainError::Token(e)
            })
        })
    }

    async fn revoke_token(&self, _token: &str, _ttl_override: Duration) -> Result<(), DomainError> {
        Err(DomainError::Configuration {
            message: "revocation store not configured".to_string(),
        })
    }

    async fn is_token_revoked(&self, _token: &str) -> Result<bool, DomainError> {
        Ok(false)
    }
}

/// Token manager that checks refresh tokens against a revocation store
pub struct RevocableTokenManager<S: RevocationStore> {
    signer: TokenSigner,
    store: S,
    span: Span,
}

impl<S: RevocationStore> RevocableTokenManager<S> {
    /// Creates a manager from the shared secret and a revocation store
    ///
    /// # Returns
    ///
    /// * `Err(DomainError::Configuration)` - The secret is empty
    pub fn new(secret: &str, store: S) -> Result<Self, DomainError> {
        Ok(Self {
            signer: TokenSigner::new(secret)?,
            store,
            span: tracing::info_span!("token_manager", revocation = true),
        })
    }

    /// Record this manager's events under `span` instead of the default one
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: RevocationStore> TokenManager for RevocableTokenManager<S> {
    fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    fn span(&self) -> &Span {
        &self.span
    }

    fn supports_revocation(&self) -> bool {
        true
    }

    async fn validate_refresh_token(&self, token: &str) -> Result<Claims, DomainError> {
        async {
            if self.store.is_revoked(token).await? {
                warn!(kind = %TokenKind::Refresh, "revoked refresh token presented");
                return Err(DomainError::Token(TokenError::TokenRevoked));
            }

            self.signer.verify(token, Utc::now()).map_err(|e| {
                debug!(kind = %TokenKind::Refresh, error = %e, "token rejected");
                DomainError::Token(e)
            })
        }
        .instrument(self.span.clone())
        .await
    }

    async fn revoke_token(&self, token: &str, ttl_override: Duration) -> Result<(), DomainError> {
        async {
            let claims = match self.validate_refresh_token(token).await {
                Ok(claims) => claims,
                Err(DomainError::Token(TokenError::TokenExpired)) => {
                    debug!("refresh token already expired, nothing to revoke");
                    return Ok(());
                }
                Err(DomainError::Token(TokenError::TokenRevoked)) => {
                    debug!("refresh token already revoked");
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

            // Re-check against the clock: the token may have expired since validation
            let Some(remaining) = claims.remaining_lifetime(Utc::now()) else {
                return Ok(());
            };
            let ttl = revocation_ttl(ttl_override, remaining);

            self.store.revoke(token, ttl).await?;
            info!(user_id = claims.user_id, ttl_ms = ttl.as_millis() as u64, "refresh token revoked");
            Ok(())
        }
        .instrument(self.span.clone())
        .await
    }

    async fn is_token_revoked(&self, token: &str) -> Result<bool, DomainError> {
        self.store.is_revoked(token).instrument(self.span.clone()).await
    }
}
