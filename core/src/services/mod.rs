//! Business services containing domain logic and use cases.

pub mod refresh;
pub mod token;

// Re-export commonly used types
pub use refresh::RefreshExchange;
pub use token::{
    revocation_ttl, RevocableTokenManager, StatelessTokenManager, TokenManager, TokenSigner,
};
