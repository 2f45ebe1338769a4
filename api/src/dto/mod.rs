pub mod auth;

pub use auth::{IdentityResponse, LogoutResponse, RefreshTokenRequest, RefreshTokenResponse};
