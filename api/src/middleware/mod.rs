pub mod auth;
pub mod refresh;

pub use auth::{extract_bearer_token, AuthContext, JwtAuth, OptionalAuth};
pub use refresh::{RefreshAuth, REFRESHED_HEADER};
