//! Gateway middleware that makes access-token expiry transparent.
//!
//! A request with an expired access token and a `refresh_token` cookie is
//! refreshed once against the auth service, then continues as if the client
//! had sent the new token. The `X-Refreshed: 1` marker on the request guards
//! against a second attempt.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue, AUTHORIZATION},
    Error,
};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, info, warn, Instrument, Span};

use pw_core::errors::{DomainError, TokenError};
use pw_core::services::{RefreshExchange, TokenManager};

use super::auth::{extract_bearer_token, inject_identity, reject, strip_identity};
use crate::cookies::{access_token_cookie, REFRESH_TOKEN_COOKIE};
use crate::handlers::ApiError;

/// Marker set on the request and the response once a refresh happened
pub const REFRESHED_HEADER: &str = "x-refreshed";

fn already_refreshed(req: &ServiceRequest) -> bool {
    req.headers()
        .get(REFRESHED_HEADER)
        .map(|value| value.as_bytes() == b"1")
        .unwrap_or(false)
}

fn mark_refreshed<B>(res: &mut ServiceResponse<B>) {
    res.headers_mut().insert(
        HeaderName::from_static(REFRESHED_HEADER),
        HeaderValue::from_static("1"),
    );
}

struct RefreshAuthInner {
    token_manager: Arc<dyn TokenManager>,
    refresher: Arc<dyn RefreshExchange>,
    access_token_ttl: Duration,
}

/// Refresh-on-expiry authentication middleware factory
pub struct RefreshAuth {
    inner: Rc<RefreshAuthInner>,
    span: Span,
}

impl RefreshAuth {
    /// # Arguments
    /// * `token_manager` - Validates access tokens (no revocation needed)
    /// * `refresher` - Exchanges the refresh token at the auth service
    /// * `access_token_ttl` - Max-age of the `access_token` cookie
    pub fn new(
        token_manager: Arc<dyn TokenManager>,
        refresher: Arc<dyn RefreshExchange>,
        access_token_ttl: Duration,
    ) -> Self {
        Self {
            inner: Rc::new(RefreshAuthInner {
                token_manager,
                refresher,
                access_token_ttl,
            }),
            span: tracing::info_span!("refresh_auth"),
        }
    }

    /// Record this middleware's events under `span`
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for RefreshAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RefreshAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RefreshAuthMiddleware {
            service: Rc::new(service),
            inner: Rc::clone(&self.inner),
            span: self.span.clone(),
        }))
    }
}

/// Refresh-on-expiry authentication middleware service
pub struct RefreshAuthMiddleware<S> {
    service: Rc<S>,
    inner: Rc<RefreshAuthInner>,
    span: Span,
}

impl<S, B> Service<ServiceRequest> for RefreshAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let inner = Rc::clone(&self.inner);
        let span = self.span.clone();

        Box::pin(
            async move {
                strip_identity(&mut req);

                if already_refreshed(&req) {
                    return Ok(reject(
                        req,
                        ApiError::unauthorized("token refresh failed previously"),
                    ));
                }

                let Some(token) = extract_bearer_token(&req) else {
                    return Ok(reject(
                        req,
                        ApiError::unauthorized("missing or invalid Authorization header"),
                    ));
                };

                match inner.token_manager.validate_access_token(&token) {
                    Ok(claims) => {
                        inject_identity(&mut req, &claims);
                        return service
                            .call(req)
                            .await
                            .map(ServiceResponse::map_into_left_body);
                    }
                    Err(e) if e.is_expired() => debug!("access token expired, refreshing"),
                    Err(_) => {
                        return Ok(reject(req, ApiError::invalid_token("invalid access token")));
                    }
                }

                let refresh_token = req
                    .cookie(REFRESH_TOKEN_COOKIE)
                    .map(|cookie| cookie.value().to_string())
                    .filter(|value| !value.is_empty());
                let Some(refresh_token) = refresh_token else {
                    return Ok(reject(req, ApiError::unauthorized("refresh token required")));
                };

                let new_token = match inner.refresher.exchange(&refresh_token).await {
                    Ok(token) => token,
                    Err(e) => {
                        warn!(error = %e, "refresh exchange failed");
                        return Ok(reject(req, ApiError::from(e)));
                    }
                };

                let cookie = access_token_cookie(
                    &new_token,
                    inner.access_token_ttl,
                    req.app_config().secure(),
                );

                // The request now carries the new token and the marker
                req.headers_mut().insert(
                    HeaderName::from_static(REFRESHED_HEADER),
                    HeaderValue::from_static("1"),
                );
                let bearer = HeaderValue::from_str(&format!("Bearer {}", new_token));
                let claims = match bearer {
                    Ok(bearer) => {
                        req.headers_mut().insert(AUTHORIZATION, bearer);
                        inner.token_manager.validate_access_token(&new_token)
                    }
                    Err(_) => Err(DomainError::Token(TokenError::InvalidToken)),
                };
                let claims = match claims {
                    Ok(claims) => claims,
                    Err(e) => {
                        warn!(error = %e, "auth service returned a token that does not validate");
                        let mut res =
                            reject::<B>(req, ApiError::invalid_token("refreshed token invalid"));
                        mark_refreshed(&mut res);
                        return Ok(res);
                    }
                };

                info!(user_id = claims.user_id, "access token refreshed");
                inject_identity(&mut req, &claims);

                let mut res = service.call(req).await?;
                if let Err(e) = res.response_mut().add_cookie(&cookie) {
                    warn!(error = %e, "failed to set access token cookie");
                }
                mark_refreshed(&mut res);
                Ok(res.map_into_left_body())
            }
            .instrument(span),
        )
    }
}
