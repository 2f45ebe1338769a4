//! Tests for the refresh endpoint client against a mock auth service

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pw_core::errors::RefreshExchangeError;
use pw_core::services::RefreshExchange;
use pw_shared::GatewayConfig;

use crate::http::refresh_client::extract_token;
use crate::http::HttpTokenRefresher;

async fn refresher_for(server: &MockServer) -> HttpTokenRefresher {
    let config = GatewayConfig::new(format!("{}/api/v1/auth/", server.uri()));
    HttpTokenRefresher::new(&config).unwrap()
}

#[tokio::test]
async fn test_exchange_posts_refresh_token_and_returns_new_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "refresh_token": "rt-123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "newAT" })))
        .expect(1)
        .mount(&server)
        .await;

    let token = refresher_for(&server).await.exchange("rt-123").await.unwrap();

    assert_eq!(token, "newAT");
}

#[tokio::test]
async fn test_non_200_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "invalid refresh token" })))
        .mount(&server)
        .await;

    let err = refresher_for(&server).await.exchange("rt").await.unwrap_err();

    assert_eq!(err, RefreshExchangeError::Rejected { status: 401 });
}

#[tokio::test]
async fn test_other_success_codes_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "token": "newAT" })))
        .mount(&server)
        .await;

    let err = refresher_for(&server).await.exchange("rt").await.unwrap_err();

    assert_eq!(err, RefreshExchangeError::Rejected { status: 201 });
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = refresher_for(&server).await.exchange("rt").await.unwrap_err();

    assert!(matches!(err, RefreshExchangeError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_missing_token_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "newAT" })))
        .mount(&server)
        .await;

    let err = refresher_for(&server).await.exchange("rt").await.unwrap_err();

    assert_eq!(err, RefreshExchangeError::MissingToken);
}

#[tokio::test]
async fn test_slow_auth_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "token": "newAT" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let refresher = HttpTokenRefresher::with_timeout(
        format!("{}/refresh", server.uri()),
        Duration::from_millis(200),
    )
    .unwrap();
    let err = refresher.exchange("rt").await.unwrap_err();

    assert!(matches!(err, RefreshExchangeError::Transport { .. }));
}

#[tokio::test]
async fn test_unreachable_auth_service_is_transport_error() {
    let refresher =
        HttpTokenRefresher::with_timeout("http://127.0.0.1:9/refresh", Duration::from_millis(500))
            .unwrap();

    let err = refresher.exchange("rt").await.unwrap_err();

    assert!(matches!(err, RefreshExchangeError::Transport { .. }));
}

#[test]
fn test_extract_token() {
    assert_eq!(extract_token(&json!({ "token": "abc" })).unwrap(), "abc");
    assert_eq!(
        extract_token(&json!({ "token": "" })),
        Err(RefreshExchangeError::MissingToken)
    );
    assert_eq!(
        extract_token(&json!({ "token": 42 })),
        Err(RefreshExchangeError::MissingToken)
    );
    assert!(matches!(
        extract_token(&json!(["token"])),
        Err(RefreshExchangeError::InvalidResponse { .. })
    ));
}
