//! Client for the auth service `/refresh` endpoint
//!
//! Request: `POST <auth-base>/refresh` with `{"refresh_token": "<token>"}`.
//! Success is exactly `200 OK` with a JSON object carrying a non-empty
//! string `token`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use pw_core::errors::RefreshExchangeError;
use pw_core::services::RefreshExchange;
use pw_shared::GatewayConfig;

use crate::InfrastructureError;

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// [`RefreshExchange`] over HTTP with a bounded timeout
#[derive(Debug, Clone)]
pub struct HttpTokenRefresher {
    client: Client,
    url: String,
}

impl HttpTokenRefresher {
    pub fn new(config: &GatewayConfig) -> Result<Self, InfrastructureError> {
        Self::with_timeout(
            config.refresh_url(),
            Duration::from_secs(config.refresh_timeout_secs),
        )
    }

    /// Build a client for an explicit endpoint URL
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, InfrastructureError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl RefreshExchange for HttpTokenRefresher {
    async fn exchange(&self, refresh_token: &str) -> Result<String, RefreshExchangeError> {
        let response = self
            .client
            .post(&self.url)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "refresh request failed");
                RefreshExchangeError::Transport {
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(status = status.as_u16(), "refresh rejected");
            return Err(RefreshExchangeError::Rejected {
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            RefreshExchangeError::InvalidResponse {
                message: e.to_string(),
            }
        })?;

        extract_token(&body)
    }
}

/// Pull the `token` string out of a decoded refresh response
pub(crate) fn extract_token(body: &Value) -> Result<String, RefreshExchangeError> {
    let object = body
        .as_object()
        .ok_or_else(|| RefreshExchangeError::InvalidResponse {
            message: "expected a JSON object".to_string(),
        })?;

    match object.get("token").and_then(Value::as_str) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(RefreshExchangeError::MissingToken),
    }
}
