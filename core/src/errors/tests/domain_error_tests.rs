use crate::errors::{DomainError, RefreshExchangeError, TokenError};

#[test]
fn test_only_expiry_is_refreshable() {
    assert!(DomainError::from(TokenError::TokenExpired).is_expired());
    assert!(!DomainError::from(TokenError::InvalidToken).is_expired());
    assert!(!DomainError::from(TokenError::TokenRevoked).is_expired());
    assert!(!DomainError::Storage {
        message: "connection refused".to_string()
    }
    .is_expired());
}

#[test]
fn test_messages() {
    assert_eq!(TokenError::TokenExpired.to_string(), "token is expired");
    assert_eq!(TokenError::TokenRevoked.to_string(), "refresh token is revoked");
    assert_eq!(
        RefreshExchangeError::Rejected { status: 401 }.to_string(),
        "refresh rejected with status 401"
    );
    // Bridged errors keep the inner message
    assert_eq!(
        DomainError::from(RefreshExchangeError::MissingToken).to_string(),
        "no token in refresh response"
    );
}
