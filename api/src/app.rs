//! Application state and route wiring

use std::sync::Arc;

use actix_web::{web, HttpResponse, ResponseError};
use tracing::info;

use pw_core::errors::DomainError;
use pw_core::services::{
    RefreshExchange, RevocableTokenManager, StatelessTokenManager, TokenManager,
};
use pw_infra::cache::{InMemoryRevocationStore, RedisClient, RedisRevocationStore};
use pw_shared::{AppConfig, JwtConfig, RevocationBackend};

use crate::handlers::ApiError;
use crate::middleware::{JwtAuth, RefreshAuth};
use crate::routes::{
    auth::{logout::logout, me::me, refresh::refresh},
    health::health_check,
};

/// Shared state handed to every handler
pub struct AppState {
    pub token_manager: Arc<dyn TokenManager>,
    pub jwt: JwtConfig,
    pub backend: RevocationBackend,
    /// Present when the revocation store is Redis; used by the health check
    pub redis: Option<RedisClient>,
}

impl AppState {
    pub fn new(token_manager: Arc<dyn TokenManager>, jwt: JwtConfig) -> Self {
        let backend = if token_manager.supports_revocation() {
            RevocationBackend::Memory
        } else {
            RevocationBackend::None
        };

        Self {
            token_manager,
            jwt,
            backend,
            redis: None,
        }
    }

    /// Build the token manager variant selected by `REVOCATION_BACKEND`
    ///
    /// # Returns
    /// * `Err(DomainError::Configuration)` - Empty secret or bad Redis URL
    /// * `Err(DomainError::Storage)` - Redis unreachable after retries
    pub async fn from_config(config: &AppConfig) -> Result<Self, DomainError> {
        let secret = config.jwt.secret.as_str();

        let mut redis = None;
        let token_manager: Arc<dyn TokenManager> = match config.cache.backend {
            RevocationBackend::Redis => {
                let store = RedisRevocationStore::connect(config.cache.clone()).await?;
                redis = Some(store.client().clone());
                Arc::new(RevocableTokenManager::new(secret, store)?)
            }
            RevocationBackend::Memory => Arc::new(RevocableTokenManager::new(
                secret,
                InMemoryRevocationStore::new(),
            )?),
            RevocationBackend::None => Arc::new(StatelessTokenManager::new(secret)?),
        };

        info!(backend = ?config.cache.backend, "token manager ready");

        Ok(Self {
            token_manager,
            jwt: config.jwt.clone(),
            backend: config.cache.backend,
            redis,
        })
    }
}

/// Register every route
///
/// `/api/v1/me` sits behind the refresh middleware (gateway path);
/// `/api/v1/auth/me` behind the plain JWT middleware.
pub fn configure(
    cfg: &mut web::ServiceConfig,
    state: web::Data<AppState>,
    refresher: Arc<dyn RefreshExchange>,
) {
    let refresh_auth = RefreshAuth::new(
        Arc::clone(&state.token_manager),
        refresher,
        state.jwt.access_token_ttl(),
    );
    let jwt_auth = JwtAuth::new(Arc::clone(&state.token_manager));

    cfg.app_data(state)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/refresh", web::post().to(refresh))
                        .route("/logout", web::post().to(logout))
                        .service(web::resource("/me").wrap(jwt_auth).route(web::get().to(me))),
                )
                .service(web::resource("/me").wrap(refresh_auth).route(web::get().to(me))),
        )
        .default_service(web::route().to(not_found));
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ApiError::not_found().error_response()
}
