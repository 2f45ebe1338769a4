//! Tests for token claims

use std::time::Duration;

use chrono::{TimeZone, Utc};

use crate::domain::entities::{Claims, Principal, TokenKind};

#[test]
fn test_claims_timing() {
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let claims = Claims::new(42, "alice", Duration::from_secs(1800), now);

    assert_eq!(claims.user_id, 42);
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.iat, 1_700_000_000);
    assert_eq!(claims.exp, 1_700_001_800);
}

#[test]
fn test_expiry_is_strict() {
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let claims = Claims::new(1, "bob", Duration::from_secs(60), now);

    assert!(!claims.is_expired_at(now));
    assert!(!claims.is_expired_at(Utc.timestamp_opt(1_700_000_059, 0).unwrap()));
    // The expiry instant itself is no longer in the future
    assert!(claims.is_expired_at(Utc.timestamp_opt(1_700_000_060, 0).unwrap()));
}

#[test]
fn test_zero_ttl_is_immediately_expired() {
    let now = Utc::now();
    let claims = Claims::new(1, "bob", Duration::ZERO, now);
    assert!(claims.is_expired_at(now));
}

#[test]
fn test_fractional_ttl_rounds_up() {
    let now = Utc.timestamp_millis_opt(1_700_000_000_950).unwrap();

    let claims = Claims::new(1, "bob", Duration::from_millis(1), now);
    assert_eq!(claims.exp, 1_700_000_001);
    assert!(!claims.is_expired_at(now));

    let claims = Claims::new(1, "bob", Duration::from_millis(1500), now);
    assert_eq!(claims.exp, 1_700_000_002);
}

#[test]
fn test_remaining_lifetime() {
    let now = Utc.timestamp_millis_opt(1_700_000_000_250).unwrap();
    let claims = Claims {
        user_id: 7,
        username: "carol".to_string(),
        exp: 1_700_000_010,
        iat: 1_700_000_000,
    };

    assert_eq!(claims.remaining_lifetime(now), Some(Duration::from_millis(9_750)));

    let after = Utc.timestamp_opt(1_700_000_010, 0).unwrap();
    assert_eq!(claims.remaining_lifetime(after), None);
}

#[test]
fn test_wire_format() {
    let claims = Claims {
        user_id: 42,
        username: "alice".to_string(),
        exp: 200,
        iat: 100,
    };
    let json = serde_json::to_value(&claims).unwrap();

    assert_eq!(
        json,
        serde_json::json!({"user_id": 42, "username": "alice", "exp": 200, "iat": 100})
    );
}

#[test]
fn test_principal_from_claims() {
    let claims = Claims::new(9, "dave", Duration::from_secs(5), Utc::now());
    assert_eq!(claims.principal(), Principal::new(9, "dave"));
}

#[test]
fn test_token_kind_display() {
    assert_eq!(TokenKind::Access.to_string(), "access");
    assert_eq!(TokenKind::Refresh.to_string(), "refresh");
}
