//! Tests for the authentication system

use super::*;
use crate::core::models::{PermissionRecord, Plaza, RoleRecord, User};
use crate::utils::crypto::hash_password;

const TEST_SECRET: &str = "unit-test-secret-that-is-at-least-32-characters";

async fn seeded_auth() -> AuthSystem {
    let storage = Arc::new(StorageLayer::new().unwrap());
    let db = storage.db();

    let plaza = db
        .create_plaza(Plaza::new("Centro Comercial Plaza Central"))
        .await
        .unwrap();

    let users_create = db
        .create_permission(PermissionRecord::new(
            "USERS_CREATE",
            "Create users",
            "USERS",
            "CREATE",
        ))
        .await
        .unwrap();
    let bulletins_read = db
        .create_permission(PermissionRecord::new(
            "BULLETINS_READ",
            "Read bulletins",
            "BULLETINS",
            "READ",
        ))
        .await
        .unwrap();

    let mut manager_role = RoleRecord::new("MANAGER", "Plaza manager with full access");
    manager_role.permission_ids = vec![users_create.id, bulletins_read.id];
    let manager_role = db.create_role(manager_role).await.unwrap();

    let mut manager = User::new(
        "manager1",
        "manager@plazacentral.com",
        hash_password("password123").unwrap(),
    );
    manager.first_name = "John".to_string();
    manager.last_name = "Doe".to_string();
    manager.plaza_id = Some(plaza.id);
    manager.role_ids = vec![manager_role.id];
    db.create_user(manager).await.unwrap();

    let mut inactive = User::new(
        "retired1",
        "retired@plazacentral.com",
        hash_password("password123").unwrap(),
    );
    inactive.is_active = false;
    inactive.plaza_id = Some(plaza.id);
    db.create_user(inactive).await.unwrap();

    let config = crate::config::AuthConfig {
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiration: 3600,
        ..crate::config::AuthConfig::default()
    };

    AuthSystem::new(&config, storage).unwrap()
}

#[tokio::test]
async fn test_login_issues_token_with_tenant_claims() {
    let auth = seeded_auth().await;

    let (principal, token) = auth.login("manager1", "password123").await.unwrap();

    assert_eq!(principal.username, "manager1");
    assert_eq!(principal.roles, vec!["MANAGER".to_string()]);
    assert_eq!(principal.plaza_id, Some(1));

    let claims = auth.jwt().parse_token(&token).unwrap();
    assert_eq!(claims.sub, "manager1");
    assert_eq!(claims.roles, vec!["MANAGER".to_string()]);
    assert_eq!(claims.plaza_id, Some(1));
    assert_eq!(
        claims.plaza_name.as_deref(),
        Some("Centro Comercial Plaza Central")
    );
}

#[tokio::test]
async fn test_bad_credentials_are_indistinguishable() {
    let auth = seeded_auth().await;

    let unknown_user = auth
        .verify_credentials("nobody", "password123")
        .await
        .unwrap_err();
    let wrong_password = auth
        .verify_credentials("manager1", "wrong")
        .await
        .unwrap_err();
    let inactive = auth
        .verify_credentials("retired1", "password123")
        .await
        .unwrap_err();

    // All three failure modes must produce the same error message.
    assert_eq!(unknown_user.to_string(), wrong_password.to_string());
    assert_eq!(wrong_password.to_string(), inactive.to_string());
    assert!(matches!(unknown_user, PlazaError::BadCredentials));
}

#[tokio::test]
async fn test_principal_permissions_resolved_eagerly() {
    let auth = seeded_auth().await;

    let principal = auth.load_principal("manager1").await.unwrap();

    assert!(principal.has_permission("USERS:CREATE"));
    assert!(principal.has_permission("BULLETINS:READ"));
    assert!(!principal.has_permission("PLAZAS:DELETE"));
}

#[tokio::test]
async fn test_load_principal_unknown_user() {
    let auth = seeded_auth().await;

    assert!(matches!(
        auth.load_principal("nobody").await,
        Err(PlazaError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_load_principal_inactive_user() {
    let auth = seeded_auth().await;

    assert!(matches!(
        auth.load_principal("retired1").await,
        Err(PlazaError::Unauthorized(_))
    ));
}
