//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{RefreshExchangeError, TokenError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Misconfiguration detected at construction or on a capability the
    /// deployment was not built with (e.g. revocation without a store)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The revocation store could not be reached or answered with an error
    #[error("Revocation store error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    RefreshExchange(#[from] RefreshExchangeError),
}

impl DomainError {
    /// True only for an expired token, the single condition that may trigger
    /// a transparent refresh.
    pub fn is_expired(&self) -> bool {
        matches!(self, DomainError::Token(TokenError::TokenExpired))
    }
}
