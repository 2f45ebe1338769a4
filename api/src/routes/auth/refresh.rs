use std::time::Duration;

use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{debug, warn};

use crate::app::AppState;
use crate::cookies::refresh_token_cookie;
use crate::dto::{RefreshTokenRequest, RefreshTokenResponse};
use crate::handlers::ApiError;

use super::presented_refresh_token;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new access token and rotates the refresh
/// token. The token is read from the `refresh_token` cookie, falling back to
/// the JSON body.
///
/// # Request Body (optional)
///
/// ```json
/// { "refresh_token": "eyJ..." }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "token": "eyJ...", "expires_at": 1700001800 }
/// ```
/// A new `refresh_token` cookie is set and, when the deployment has a
/// revocation store, the old refresh token is revoked.
///
/// ## Errors
/// - 400 Bad Request: No refresh token presented
/// - 401 Unauthorized: Invalid, expired or revoked refresh token
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn refresh(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, ApiError> {
    let refresh_token = presented_refresh_token(&req, body)
        .ok_or_else(|| ApiError::bad_request("refresh token required"))?;

    let claims = state.token_manager.validate_refresh_token(&refresh_token).await?;
    let pair = state.token_manager.generate_token(
        claims.user_id,
        &claims.username,
        state.jwt.access_token_ttl(),
        state.jwt.refresh_token_ttl(),
    )?;

    // A pair minted in the same second as the old one can be byte-identical
    if !state.token_manager.supports_revocation() {
        debug!(user_id = claims.user_id, "no revocation backend, old refresh token stays valid");
    } else if pair.refresh_token == refresh_token {
        debug!(user_id = claims.user_id, "rotated refresh token unchanged, keeping it");
    } else if let Err(e) = state
        .token_manager
        .revoke_token(&refresh_token, Duration::ZERO)
        .await
    {
        warn!(user_id = claims.user_id, error = %e, "failed to revoke rotated refresh token");
    }

    let cookie = refresh_token_cookie(
        &pair.refresh_token,
        state.jwt.refresh_token_ttl(),
        req.app_config().secure(),
    );

    Ok(HttpResponse::Ok().cookie(cookie).json(RefreshTokenResponse {
        token: pair.access_token,
        expires_at: pair.access_expires_at,
    }))
}
