//! Token and refresh exchange error types

use thiserror::Error;

/// Token validation and issuance errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature verified but the expiry instant has passed
    #[error("token is expired")]
    TokenExpired,

    /// Malformed token, bad signature or unexpected algorithm
    #[error("invalid token")]
    InvalidToken,

    /// Refresh token present in the revocation store
    #[error("refresh token is revoked")]
    TokenRevoked,

    #[error("token generation failed")]
    TokenGenerationFailed,
}

/// Failures of the gateway's call to the auth service refresh endpoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefreshExchangeError {
    /// Connection failure or timeout
    #[error("refresh request failed: {message}")]
    Transport { message: String },

    /// Auth service answered with a non-200 status
    #[error("refresh rejected with status {status}")]
    Rejected { status: u16 },

    /// Response body was not the expected JSON
    #[error("invalid refresh response: {message}")]
    InvalidResponse { message: String },

    /// Response had no usable `token` field
    #[error("no token in refresh response")]
    MissingToken,
}
