//! JWT authentication middleware and the identity it injects.
//!
//! Identity travels two ways: an [`AuthContext`] in request extensions and
//! the `X-User-Id` / `X-Username` request headers. Services sitting behind
//! the gateway only see the headers, so the [`AuthContext`] extractor falls
//! back to them.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{
        header::{HeaderName, HeaderValue, AUTHORIZATION},
        StatusCode,
    },
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn, Instrument, Span};

use pw_core::{domain::entities::token::Claims, services::TokenManager};
use pw_shared::error_codes;

use crate::handlers::ApiError;

/// Downstream header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Downstream header carrying the authenticated username
pub const USERNAME_HEADER: &str = "x-username";

/// User authentication context injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: u64,
    pub username: String,
}

impl AuthContext {
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username.clone(),
        }
    }

    /// Identity forwarded by the gateway in request headers
    fn from_headers(req: &HttpRequest) -> Option<Self> {
        let user_id = req.headers().get(USER_ID_HEADER)?.to_str().ok()?.parse().ok()?;
        let username = req.headers().get(USERNAME_HEADER)?.to_str().ok()?.to_string();
        Some(Self { user_id, username })
    }
}

/// Extracts the Bearer token from the Authorization header
///
/// The scheme is case-sensitive and surrounding whitespace is trimmed; an
/// empty token counts as missing.
pub fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let token = req
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Drop any identity headers a client sent itself
pub(crate) fn strip_identity(req: &mut ServiceRequest) {
    req.headers_mut().remove(USER_ID_HEADER);
    req.headers_mut().remove(USERNAME_HEADER);
}

/// Make validated claims visible to downstream handlers
pub(crate) fn inject_identity(req: &mut ServiceRequest, claims: &Claims) {
    strip_identity(req);
    req.headers_mut().insert(
        HeaderName::from_static(USER_ID_HEADER),
        HeaderValue::from(claims.user_id),
    );
    match HeaderValue::from_str(&claims.username) {
        Ok(value) => {
            req.headers_mut()
                .insert(HeaderName::from_static(USERNAME_HEADER), value);
        }
        Err(_) => warn!(user_id = claims.user_id, "username is not a valid header value"),
    }
    req.extensions_mut().insert(AuthContext::from_claims(claims));
}

/// Short-circuit with an error response
pub(crate) fn reject<B>(req: ServiceRequest, error: ApiError) -> ServiceResponse<EitherBody<B>> {
    debug!(status = error.status().as_u16(), reason = error.message(), "request rejected");
    req.into_response(error.error_response()).map_into_right_body()
}

/// JWT authentication middleware factory
///
/// Validates the bearer token without attempting a refresh. Use
/// [`RefreshAuth`](super::refresh::RefreshAuth) where expiry should be
/// transparent to the caller.
pub struct JwtAuth {
    token_manager: Arc<dyn TokenManager>,
    span: Span,
}

impl JwtAuth {
    pub fn new(token_manager: Arc<dyn TokenManager>) -> Self {
        Self {
            token_manager,
            span: tracing::info_span!("jwt_auth"),
        }
    }

    /// Record this middleware's events under `span`
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_manager: Arc::clone(&self.token_manager),
            span: self.span.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_manager: Arc<dyn TokenManager>,
    span: Span,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
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
        let token_manager = Arc::clone(&self.token_manager);
        let span = self.span.clone();

        Box::pin(
            async move {
                let Some(token) = extract_bearer_token(&req) else {
                    return Ok(reject(
                        req,
                        ApiError::unauthorized("missing or invalid Authorization header"),
                    ));
                };

                match token_manager.validate_access_token(&token) {
                    Ok(claims) => {
                        inject_identity(&mut req, &claims);
                        service.call(req).await.map(ServiceResponse::map_into_left_body)
                    }
                    Err(e) if e.is_expired() => Ok(reject(
                        req,
                        ApiError::new(
                            StatusCode::UNAUTHORIZED,
                            error_codes::TOKEN_EXPIRED,
                            "access token expired",
                        ),
                    )),
                    Err(_) => Ok(reject(req, ApiError::invalid_token("invalid access token"))),
                }
            }
            .instrument(span),
        )
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .or_else(|| AuthContext::from_headers(req))
            .ok_or_else(|| Error::from(ApiError::unauthorized("authentication required")));

        ready(result)
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let auth = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .or_else(|| AuthContext::from_headers(req));
        ready(Ok(OptionalAuth(auth)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer   padded  "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("padded".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_lowercase = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_lowercase), None);

        let req_empty = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_inject_identity_replaces_client_headers() {
        use actix_web::test;

        let mut req = test::TestRequest::default()
            .insert_header(("X-User-Id", "1"))
            .insert_header(("X-Username", "mallory"))
            .to_srv_request();
        let claims = Claims {
            user_id: 42,
            username: "alice".to_string(),
            exp: 0,
            iat: 0,
        };

        inject_identity(&mut req, &claims);

        assert_eq!(req.headers().get(USER_ID_HEADER).unwrap(), "42");
        assert_eq!(req.headers().get(USERNAME_HEADER).unwrap(), "alice");
        assert_eq!(
            req.extensions().get::<AuthContext>(),
            Some(&AuthContext {
                user_id: 42,
                username: "alice".to_string()
            })
        );
    }
}
