//! Integration test: seed -> login -> token -> authorize
//!
//! Exercises the auth stack end-to-end against seeded storage, the way the
//! request gate uses it: credentials in, token out, principal reconstructed
//! from the token's subject claim.

use plaza_gateway::config::Config;
use plaza_gateway::services::seed;
use plaza_gateway::storage::StorageLayer;
use plaza_gateway::{AuthSystem, PlazaError};
use std::sync::Arc;

const TEST_SECRET: &str = "integration-test-secret-of-sufficient-length";

async fn seeded_auth() -> anyhow::Result<AuthSystem> {
    let mut config = Config::default();
    config.gateway.auth.jwt_secret = TEST_SECRET.to_string();
    config.gateway.auth.jwt_expiration = 3600;

    let storage = Arc::new(StorageLayer::new()?);
    let auth = AuthSystem::new(&config.gateway.auth, Arc::clone(&storage))?;
    seed::run(&storage, auth.rbac()).await?;

    Ok(auth)
}

#[tokio::test]
async fn seeded_manager_login_round_trip() -> anyhow::Result<()> {
    let auth = seeded_auth().await?;

    // Login issues a token whose claims carry roles and tenant.
    let (principal, token) = auth.login("manager1", "password123").await?;
    assert_eq!(principal.plaza_id, Some(1));

    let claims = auth.jwt().parse_token(&token).unwrap();
    assert_eq!(claims.sub, "manager1");
    assert_eq!(claims.roles, vec!["MANAGER".to_string()]);
    assert_eq!(claims.plaza_id, Some(1));

    // The gate reconstructs the principal from the subject claim alone.
    let reloaded = auth.load_principal(&claims.sub).await?;
    assert_eq!(reloaded.user_id, principal.user_id);
    assert_eq!(reloaded.require_plaza()?, 1);
    assert!(reloaded.has_role("MANAGER"));
    assert!(reloaded.has_permission("USERS:CREATE"));
    assert!(reloaded.has_permission("PLAZAS:DELETE"));

    Ok(())
}

#[tokio::test]
async fn employee_principal_is_scoped_and_limited() -> anyhow::Result<()> {
    let auth = seeded_auth().await?;

    let (principal, token) = auth.login("security1", "password123").await?;

    assert_eq!(principal.roles, vec!["EMPLOYEE_SECURITY".to_string()]);
    assert!(!principal.has_any_role(&["MANAGER", "ADMIN"]));
    assert!(principal.has_permission("SECURITY:ACCESS"));
    assert!(!principal.has_permission("USERS:CREATE"));

    // Same tenant as the manager of plaza 1.
    let claims = auth.jwt().parse_token(&token).unwrap();
    assert_eq!(claims.plaza_id, Some(1));

    Ok(())
}

#[tokio::test]
async fn tenants_are_separated_at_the_principal() -> anyhow::Result<()> {
    let auth = seeded_auth().await?;

    let (manager1, _) = auth.login("manager1", "password123").await?;
    let (manager2, _) = auth.login("manager2", "password123").await?;

    assert_eq!(manager1.require_plaza()?, 1);
    assert_eq!(manager2.require_plaza()?, 2);
    assert_ne!(manager1.plaza_name, manager2.plaza_name);

    Ok(())
}

#[tokio::test]
async fn login_failures_collapse_to_bad_credentials() -> anyhow::Result<()> {
    let auth = seeded_auth().await?;

    let unknown = auth.login("ghost", "password123").await.unwrap_err();
    let wrong = auth.login("manager1", "letmein").await.unwrap_err();

    assert!(matches!(unknown, PlazaError::BadCredentials));
    assert!(matches!(wrong, PlazaError::BadCredentials));
    assert_eq!(unknown.to_string(), wrong.to_string());

    Ok(())
}

#[tokio::test]
async fn foreign_token_is_rejected() -> anyhow::Result<()> {
    let auth = seeded_auth().await?;

    // A token signed by a differently-keyed deployment does not validate.
    let mut foreign_config = Config::default();
    foreign_config.gateway.auth.jwt_secret =
        "a-completely-different-secret-of-enough-length".to_string();
    let foreign_storage = Arc::new(StorageLayer::new()?);
    let foreign_auth = AuthSystem::new(&foreign_config.gateway.auth, Arc::clone(&foreign_storage))?;
    seed::run(&foreign_storage, foreign_auth.rbac()).await?;

    let (_, foreign_token) = foreign_auth.login("manager1", "password123").await?;
    assert!(auth.jwt().parse_token(&foreign_token).is_err());
    assert!(!auth.jwt().is_valid(&foreign_token));

    Ok(())
}
