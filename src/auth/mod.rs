//! Authentication and authorization system
//!
//! Credential verification, principal loading and token issuance. The
//! [`Principal`] produced here is the only identity handlers ever see; it is
//! resolved eagerly (roles, permissions, tenant) so authorization never goes
//! back to storage mid-request.

pub mod jwt;
pub mod principal;
pub mod rbac;

#[cfg(test)]
mod tests;

pub use principal::Principal;

use crate::config::AuthConfig;
use crate::core::models::User;
use crate::storage::StorageLayer;
use crate::utils::crypto::verify_password;
use crate::utils::error::{PlazaError, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Main authentication system
#[derive(Clone)]
pub struct AuthSystem {
    /// Authentication configuration
    config: Arc<AuthConfig>,
    /// Storage layer for user data
    storage: Arc<StorageLayer>,
    /// Token codec
    jwt: Arc<jwt::JwtHandler>,
    /// RBAC registry
    rbac: Arc<rbac::RbacSystem>,
}

impl AuthSystem {
    /// Create a new authentication system
    pub fn new(config: &AuthConfig, storage: Arc<StorageLayer>) -> Result<Self> {
        info!("Initializing authentication system");

        let config = Arc::new(config.clone());
        let jwt = Arc::new(jwt::JwtHandler::new(&config)?);
        let rbac = Arc::new(rbac::RbacSystem::new(&config.rbac)?);

        info!("Authentication system initialized successfully");

        Ok(Self {
            config,
            storage,
            jwt,
            rbac,
        })
    }

    /// Verify a username/password pair and return the resolved principal
    ///
    /// Unknown username, wrong password and inactive account all collapse
    /// into the same [`PlazaError::BadCredentials`] so callers cannot tell
    /// which one failed.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<Principal> {
        let user = match self.storage.db().find_user_by_username(username).await? {
            Some(user) => user,
            None => {
                warn!("Login attempt with unknown username: {}", username);
                return Err(PlazaError::BadCredentials);
            }
        };

        if !verify_password(password, &user.password_hash)? {
            warn!("Login attempt with invalid password for user: {}", username);
            return Err(PlazaError::BadCredentials);
        }

        if !user.is_active {
            warn!("Login attempt for inactive user: {}", username);
            return Err(PlazaError::BadCredentials);
        }

        self.resolve_principal(&user).await
    }

    /// Resolve a username to a full principal
    ///
    /// Used by the request gate when reconstructing identity from a token's
    /// subject claim.
    pub async fn load_principal(&self, username: &str) -> Result<Principal> {
        let user = self
            .storage
            .db()
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| PlazaError::not_found(format!("User not found: {}", username)))?;

        if !user.is_active {
            return Err(PlazaError::unauthorized("Account is not active"));
        }

        self.resolve_principal(&user).await
    }

    /// Verify credentials and issue an access token
    pub async fn login(&self, username: &str, password: &str) -> Result<(Principal, String)> {
        info!("User login attempt: {}", username);

        let principal = self.verify_credentials(username, password).await?;
        let token = self.jwt.issue_token(&principal)?;

        info!("User logged in successfully: {}", username);
        Ok((principal, token))
    }

    async fn resolve_principal(&self, user: &User) -> Result<Principal> {
        debug!("Resolving principal for user: {}", user.username);

        let plaza = match user.plaza_id {
            Some(plaza_id) => self.storage.db().find_plaza_by_id(plaza_id).await?,
            None => None,
        };

        let roles = self.storage.db().find_roles_by_ids(&user.role_ids).await?;

        let permission_ids: Vec<i64> = roles
            .iter()
            .flat_map(|role| role.permission_ids.iter().copied())
            .collect();
        let permissions = self
            .storage
            .db()
            .find_permissions_by_ids(&permission_ids)
            .await?;

        Ok(Principal::from_user(
            user,
            plaza.as_ref(),
            &roles,
            &permissions,
        ))
    }

    /// Get authentication configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Get the token codec
    pub fn jwt(&self) -> &jwt::JwtHandler {
        &self.jwt
    }

    /// Get the RBAC registry
    pub fn rbac(&self) -> &rbac::RbacSystem {
        &self.rbac
    }
}
