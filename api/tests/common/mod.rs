//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use async_trait::async_trait;
use chrono::Utc;
use tracing::Span;

use pw_api::app::AppState;
use pw_core::domain::entities::token::Claims;
use pw_core::errors::DomainError;
use pw_core::services::{StatelessTokenManager, TokenManager, TokenSigner};
use pw_shared::JwtConfig;

pub const SECRET: &str = "integration-test-secret";
pub const ACCESS_TTL: Duration = Duration::from_secs(30 * 60);
pub const REFRESH_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub fn jwt_config() -> JwtConfig {
    JwtConfig::new(SECRET)
}

pub fn state(manager: Arc<dyn TokenManager>) -> web::Data<AppState> {
    web::Data::new(AppState::new(manager, jwt_config()))
}

/// Valid token signed with [`SECRET`]
pub fn token_for(manager: &dyn TokenManager, user_id: u64, username: &str) -> String {
    manager
        .generate_token(user_id, username, ACCESS_TTL, REFRESH_TTL)
        .unwrap()
        .access_token
}

/// Token whose signature is fine but whose expiry has passed
pub fn expired_token(signer: &TokenSigner, user_id: u64, username: &str) -> String {
    let now = Utc::now().timestamp();
    signer
        .encode(&Claims {
            user_id,
            username: username.to_string(),
            exp: now - 60,
            iat: now - 3600,
        })
        .unwrap()
}

/// Refresh token issued a while ago, so a fresh pair never collides with it
pub fn aged_refresh_token(signer: &TokenSigner, user_id: u64, username: &str) -> String {
    let now = Utc::now().timestamp();
    signer
        .encode(&Claims {
            user_id,
            username: username.to_string(),
            exp: now + 3600,
            iat: now - 60,
        })
        .unwrap()
}

/// Token manager that counts access-token validations and revocation attempts
pub struct CountingTokenManager {
    inner: StatelessTokenManager,
    validations: AtomicUsize,
    revocations: AtomicUsize,
}

impl CountingTokenManager {
    pub fn new() -> Self {
        Self {
            inner: StatelessTokenManager::new(SECRET).unwrap(),
            validations: AtomicUsize::new(0),
            revocations: AtomicUsize::new(0),
        }
    }

    pub fn validations(&self) -> usize {
        self.validations.load(Ordering::SeqCst)
    }

    pub fn revocations(&self) -> usize {
        self.revocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenManager for CountingTokenManager {
    fn signer(&self) -> &TokenSigner {
        self.inner.signer()
    }

    fn span(&self) -> &Span {
        self.inner.span()
    }

    fn supports_revocation(&self) -> bool {
        false
    }

    fn validate_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.validations.fetch_add(1, Ordering::SeqCst);
        self.inner.validate_access_token(token)
    }

    async fn validate_refresh_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.inner.validate_refresh_token(token).await
    }

    async fn revoke_token(&self, token: &str, ttl_override: Duration) -> Result<(), DomainError> {
        self.revocations.fetch_add(1, Ordering::SeqCst);
        self.inner.revoke_token(token, ttl_override).await
    }

    async fn is_token_revoked(&self, token: &str) -> Result<bool, DomainError> {
        self.inner.is_token_revoked(token).await
    }
}
