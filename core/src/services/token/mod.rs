//! Token manager module for JWT management
//!
//! Issues access/refresh pairs, validates them, mints access tokens from
//! refresh tokens and (in the revocable variant) denylists refresh tokens.

mod service;
mod signer;

#[cfg(test)]
mod tests;

pub use service::{revocation_ttl, RevocableTokenManager, StatelessTokenManager, TokenManager};
pub use signer::TokenSigner;
