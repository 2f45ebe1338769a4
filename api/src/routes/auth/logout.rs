use std::time::Duration;

use actix_web::{web, HttpRequest, HttpResponse};
use tracing::info;

use crate::app::AppState;
use crate::cookies::{removal_cookie, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::dto::{LogoutResponse, RefreshTokenRequest};
use crate::handlers::ApiError;

use super::presented_refresh_token;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the presented refresh token (when the deployment has a revocation
/// store) and clears both token cookies. Works with an expired access token.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "message": "logged out" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: No refresh token presented
/// - 401 Unauthorized: Malformed refresh token
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, ApiError> {
    let refresh_token = presented_refresh_token(&req, body)
        .ok_or_else(|| ApiError::bad_request("refresh token required"))?;

    if state.token_manager.supports_revocation() {
        state
            .token_manager
            .revoke_token(&refresh_token, Duration::ZERO)
            .await?;
        info!("refresh token revoked on logout");
    }

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie(ACCESS_TOKEN_COOKIE))
        .cookie(removal_cookie(REFRESH_TOKEN_COOKIE))
        .json(LogoutResponse {
            message: "logged out".to_string(),
        }))
}
