use actix_web::{web, HttpResponse};
use tracing::warn;

use crate::app::AppState;

/// Health check endpoint handler
///
/// Reports the revocation backend and, for Redis, whether it answers PING.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let store = match &state.redis {
        Some(client) => match client.health_check().await {
            Ok(true) => "up",
            Ok(false) => "down",
            Err(e) => {
                warn!(error = %e, "revocation store health check failed");
                "down"
            }
        },
        None => "local",
    };

    let body = serde_json::json!({
        "status": if store == "down" { "degraded" } else { "healthy" },
        "service": "pw-api",
        "version": env!("CARGO_PKG_VERSION"),
        "revocation": state.backend,
        "store": store,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if store == "down" {
        HttpResponse::ServiceUnavailable().json(body)
    } else {
        HttpResponse::Ok().json(body)
    }
}
