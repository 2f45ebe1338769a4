//! Authentication route handlers
//!
//! - Token refresh with rotation
//! - Logout (revocation plus cookie removal)
//! - Identity of the caller

pub mod logout;
pub mod me;
pub mod refresh;

use actix_web::{web, HttpRequest};

use crate::cookies::REFRESH_TOKEN_COOKIE;
use crate::dto::RefreshTokenRequest;

/// Refresh token from the `refresh_token` cookie, else from the JSON body
fn presented_refresh_token(
    req: &HttpRequest,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Option<String> {
    req.cookie(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| {
            body.map(|body| body.into_inner().refresh_token)
                .filter(|value| !value.is_empty())
        })
}
