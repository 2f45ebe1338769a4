//! Token entities for JWT-based authentication.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::principal::Principal;

/// Which role a token plays.
///
/// Nothing in the token marks its kind; it is implied by which validation
/// path the caller picks. The enum only labels log events and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for JWT payload
///
/// Wire format: `{"user_id": <int>, "username": <str>, "exp": <secs>, "iat": <secs>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User identifier
    pub user_id: u64,

    /// Display name
    pub username: String,

    /// Expiration timestamp
    pub exp: i64,

    /// Issued at timestamp
    pub iat: i64,
}

impl Claims {
    /// Creates claims issued at `now` that expire `ttl` later
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's numeric identifier
    /// * `username` - The user's display name
    /// * `ttl` - Lifetime of the token, rounded up to whole seconds so a
    ///   positive TTL never yields `exp == iat`
    /// * `now` - Issue instant
    pub fn new(user_id: u64, username: &str, ttl: Duration, now: DateTime<Utc>) -> Self {
        let issued_at = now.timestamp();
        let secs = ttl.as_secs().saturating_add(u64::from(ttl.subsec_nanos() > 0));
        let lifetime = i64::try_from(secs).unwrap_or(i64::MAX);

        Self {
            user_id,
            username: username.to_string(),
            exp: issued_at.saturating_add(lifetime),
            iat: issued_at,
        }
    }

    /// A token is expired once its expiry instant is not strictly in the future.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Time left until the expiry instant, or `None` once it has passed.
    pub fn remaining_lifetime(&self, now: DateTime<Utc>) -> Option<Duration> {
        let remaining_ms = self
            .exp
            .saturating_mul(1000)
            .saturating_sub(now.timestamp_millis());
        if remaining_ms <= 0 {
            None
        } else {
            Some(Duration::from_millis(remaining_ms as u64))
        }
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.username.clone())
    }
}

/// Token pair returned at issuance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry as a unix timestamp
    pub access_expires_at: i64,

    /// Refresh token expiry as a unix timestamp
    pub refresh_expires_at: i64,
}
