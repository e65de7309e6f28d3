//! Tests for the token codec

use super::types::{Claims, TokenError};
use super::*;
use crate::auth::principal::Principal;
use crate::config::AuthConfig;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

const TEST_SECRET: &str = "unit-test-secret-that-is-at-least-32-characters";

fn test_config(secret: &str) -> AuthConfig {
    AuthConfig {
        jwt_secret: secret.to_string(),
        jwt_expiration: 3600,
        ..AuthConfig::default()
    }
}

fn test_handler() -> JwtHandler {
    JwtHandler::new(&test_config(TEST_SECRET)).unwrap()
}

fn manager_principal() -> Principal {
    Principal {
        user_id: 1,
        username: "manager1".to_string(),
        roles: vec!["MANAGER".to_string()],
        permissions: HashSet::new(),
        plaza_id: Some(1),
        plaza_name: Some("Centro Comercial Plaza Central".to_string()),
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

#[test]
fn test_issue_then_parse_round_trip() {
    let handler = test_handler();
    let principal = manager_principal();

    let token = handler.issue_token(&principal).unwrap();
    let claims = handler.parse_token(&token).unwrap();

    assert_eq!(claims.sub, "manager1");
    assert_eq!(claims.roles, vec!["MANAGER".to_string()]);
    assert_eq!(claims.user_id, 1);
    assert_eq!(claims.plaza_id, Some(1));
    assert_eq!(
        claims.plaza_name.as_deref(),
        Some("Centro Comercial Plaza Central")
    );
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_unscoped_principal_has_no_tenant_claims() {
    let handler = test_handler();
    let principal = Principal {
        plaza_id: None,
        plaza_name: None,
        ..manager_principal()
    };

    let token = handler.issue_token(&principal).unwrap();
    let claims = handler.parse_token(&token).unwrap();

    assert_eq!(claims.plaza_id, None);
    assert_eq!(claims.plaza_name, None);
}

#[test]
fn test_expired_token_rejected() {
    let handler = test_handler();

    // Hand-craft a token whose expiry is well past the validation leeway.
    let now = now_secs();
    let claims = Claims {
        sub: "manager1".to_string(),
        iat: now - 7200,
        exp: now - 3600,
        iss: "plaza-gateway".to_string(),
        roles: vec!["MANAGER".to_string()],
        user_id: 1,
        plaza_id: Some(1),
        plaza_name: None,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    assert_eq!(handler.parse_token(&token), Err(TokenError::Expired));
    assert!(!handler.is_valid(&token));
}

#[test]
fn test_foreign_secret_rejected() {
    let handler = test_handler();
    let foreign =
        JwtHandler::new(&test_config("another-secret-that-is-also-32-characters-x")).unwrap();

    let token = foreign.issue_token(&manager_principal()).unwrap();

    assert_eq!(
        handler.parse_token(&token),
        Err(TokenError::InvalidSignature)
    );
}

#[test]
fn test_garbage_token_is_malformed() {
    let handler = test_handler();

    assert_eq!(
        handler.parse_token("not-a-jwt-at-all"),
        Err(TokenError::Malformed)
    );
    assert_eq!(handler.parse_token(""), Err(TokenError::Malformed));
}

#[test]
fn test_is_valid_for_fresh_token() {
    let handler = test_handler();
    let token = handler.issue_token(&manager_principal()).unwrap();

    assert!(handler.is_valid(&token));
}
