use actix_web::HttpResponse;

use crate::dto::IdentityResponse;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/me and GET /api/v1/auth/me
///
/// Echoes the identity injected by the authentication middleware.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(IdentityResponse {
        user_id: auth.user_id,
        username: auth.username,
    })
}
