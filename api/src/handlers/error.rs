//! Mapping from domain errors to HTTP responses
//!
//! Every per-request failure ends up as a JSON [`ErrorResponse`]
//! (`{"error", "message", "timestamp"}`) with the status chosen here.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::{debug, error};

use pw_core::errors::{DomainError, RefreshExchangeError, TokenError};
use pw_shared::{error_codes, ErrorResponse};

/// An HTTP error: status, machine-readable code and client-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED, message)
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error_codes::TOKEN_INVALID, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST, message)
    }

    pub fn not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            "The requested resource was not found",
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.status.as_u16(), self.code, self.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(ErrorResponse::new(self.code, self.message.clone()))
    }
}

impl From<RefreshExchangeError> for ApiError {
    fn from(error: RefreshExchangeError) -> Self {
        match error {
            // The auth service said no: the client's refresh token is the problem
            RefreshExchangeError::Rejected { .. } => Self::new(
                StatusCode::UNAUTHORIZED,
                error_codes::REFRESH_FAILED,
                "refresh failed",
            ),
            RefreshExchangeError::Transport { .. } => Self::new(
                StatusCode::BAD_GATEWAY,
                error_codes::BAD_GATEWAY,
                "failed to refresh token",
            ),
            RefreshExchangeError::InvalidResponse { .. } => Self::new(
                StatusCode::BAD_GATEWAY,
                error_codes::BAD_GATEWAY,
                "invalid refresh response",
            ),
            RefreshExchangeError::MissingToken => Self::new(
                StatusCode::BAD_GATEWAY,
                error_codes::BAD_GATEWAY,
                "no token in refresh response",
            ),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let api_error = match &error {
            DomainError::Token(TokenError::TokenExpired) => Self::new(
                StatusCode::UNAUTHORIZED,
                error_codes::TOKEN_EXPIRED,
                "token is expired",
            ),
            DomainError::Token(TokenError::InvalidToken) => Self::invalid_token("invalid token"),
            DomainError::Token(TokenError::TokenRevoked) => Self::new(
                StatusCode::UNAUTHORIZED,
                error_codes::TOKEN_REVOKED,
                "refresh token is revoked",
            ),
            DomainError::Token(TokenError::TokenGenerationFailed) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                "token generation failed",
            ),
            DomainError::RefreshExchange(exchange) => Self::from(exchange.clone()),
            DomainError::Storage { .. } => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                error_codes::CACHE_ERROR,
                "revocation store unavailable",
            ),
            DomainError::Configuration { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::CONFIGURATION_ERROR,
                "server misconfigured",
            ),
            DomainError::Internal { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ),
        };

        if api_error.status.is_server_error() {
            error!(error = %error, status = api_error.status.as_u16(), "request failed");
        } else {
            debug!(error = %error, status = api_error.status.as_u16(), "request rejected");
        }

        api_error
    }
}

/// Convert a domain error straight into a response
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    ApiError::from(error).error_response()
}
