//! User table operations

use crate::core::models::User;
use crate::utils::error::{PlazaError, Result};
use chrono::Utc;
use tracing::debug;

use super::Database;

impl Database {
    /// Create a new user
    pub async fn create_user(&self, user: User) -> Result<User> {
        debug!("Creating user: {}", user.username);
        Ok(self.users.insert(user, |row, id| row.id = id))
    }

    /// Update an existing user, bumping its update timestamp
    pub async fn update_user(&self, mut user: User) -> Result<User> {
        debug!("Updating user: {}", user.id);
        user.updated_at = Utc::now();

        if self.users.replace(user.id, user.clone()) {
            Ok(user)
        } else {
            Err(PlazaError::not_found(format!(
                "User not found: {}",
                user.id
            )))
        }
    }

    /// Find user by ID
    pub async fn find_user_by_id(&self, user_id: i64) -> Result<Option<User>> {
        debug!("Finding user by ID: {}", user_id);
        Ok(self.users.get(user_id))
    }

    /// Find user by username
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        debug!("Finding user by username: {}", username);
        Ok(self.users.find(|user| user.username == username))
    }

    /// Find user by external ID
    pub async fn find_user_by_external_id(&self, external_id: &str) -> Result<Option<User>> {
        debug!("Finding user by external ID: {}", external_id);
        Ok(self
            .users
            .find(|user| user.external_id.as_deref() == Some(external_id)))
    }

    /// Find an active user by id inside a plaza
    pub async fn find_user_by_id_and_plaza(
        &self,
        user_id: i64,
        plaza_id: i64,
    ) -> Result<Option<User>> {
        debug!("Finding user {} in plaza {}", user_id, plaza_id);
        Ok(self.users.find(|user| {
            user.id == user_id && user.plaza_id == Some(plaza_id) && user.is_active
        }))
    }

    /// List active users of a plaza
    pub async fn find_users_by_plaza(&self, plaza_id: i64) -> Result<Vec<User>> {
        debug!("Listing users of plaza {}", plaza_id);
        let mut users = self
            .users
            .filter(|user| user.plaza_id == Some(plaza_id) && user.is_active);
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    /// List active users of a plaza holding the given role
    pub async fn find_users_by_plaza_and_role(
        &self,
        plaza_id: i64,
        role_id: i64,
    ) -> Result<Vec<User>> {
        debug!("Listing users of plaza {} with role {}", plaza_id, role_id);
        let mut users = self.users.filter(|user| {
            user.plaza_id == Some(plaza_id) && user.is_active && user.role_ids.contains(&role_id)
        });
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    /// Check whether a username is taken
    pub async fn exists_user_by_username(&self, username: &str) -> Result<bool> {
        Ok(self.users.any(|user| user.username == username))
    }

    /// Check whether an email is taken
    pub async fn exists_user_by_email(&self, email: &str) -> Result<bool> {
        Ok(self.users.any(|user| user.email == email))
    }

    /// Check whether another user already holds this username
    pub async fn exists_user_by_username_excluding(
        &self,
        username: &str,
        user_id: i64,
    ) -> Result<bool> {
        Ok(self
            .users
            .any(|user| user.username == username && user.id != user_id))
    }

    /// Check whether another user already holds this email
    pub async fn exists_user_by_email_excluding(&self, email: &str, user_id: i64) -> Result<bool> {
        Ok(self
            .users
            .any(|user| user.email == email && user.id != user_id))
    }

    /// Number of user rows
    pub async fn count_users(&self) -> Result<usize> {
        Ok(self.users.len())
    }
}
