//! Role and permission table operations

use crate::core::models::{PermissionRecord, RoleRecord};
use crate::utils::error::{PlazaError, Result};
use chrono::Utc;
use tracing::debug;

use super::Database;

impl Database {
    /// Create a new role
    pub async fn create_role(&self, role: RoleRecord) -> Result<RoleRecord> {
        debug!("Creating role: {}", role.name);
        Ok(self.roles.insert(role, |row, id| row.id = id))
    }

    /// Update an existing role, bumping its update timestamp
    pub async fn update_role(&self, mut role: RoleRecord) -> Result<RoleRecord> {
        debug!("Updating role: {}", role.id);
        role.updated_at = Utc::now();

        if self.roles.replace(role.id, role.clone()) {
            Ok(role)
        } else {
            Err(PlazaError::not_found(format!(
                "Role not found: {}",
                role.id
            )))
        }
    }

    /// Find role by ID
    pub async fn find_role_by_id(&self, role_id: i64) -> Result<Option<RoleRecord>> {
        Ok(self.roles.get(role_id))
    }

    /// Find role by name
    pub async fn find_role_by_name(&self, name: &str) -> Result<Option<RoleRecord>> {
        debug!("Finding role by name: {}", name);
        Ok(self.roles.find(|role| role.name == name))
    }

    /// Resolve a set of role ids to their active records
    pub async fn find_roles_by_ids(&self, role_ids: &[i64]) -> Result<Vec<RoleRecord>> {
        let mut roles = self
            .roles
            .filter(|role| role.is_active && role_ids.contains(&role.id));
        roles.sort_by_key(|role| role.id);
        Ok(roles)
    }

    /// List active roles
    pub async fn list_active_roles(&self) -> Result<Vec<RoleRecord>> {
        let mut roles = self.roles.filter(|role| role.is_active);
        roles.sort_by_key(|role| role.id);
        Ok(roles)
    }

    /// Number of role rows
    pub async fn count_roles(&self) -> Result<usize> {
        Ok(self.roles.len())
    }

    /// Create a new permission
    pub async fn create_permission(&self, permission: PermissionRecord) -> Result<PermissionRecord> {
        debug!("Creating permission: {}", permission.name);
        Ok(self.permissions.insert(permission, |row, id| row.id = id))
    }

    /// Find permission by ID
    pub async fn find_permission_by_id(
        &self,
        permission_id: i64,
    ) -> Result<Option<PermissionRecord>> {
        Ok(self.permissions.get(permission_id))
    }

    /// Find permission by name
    pub async fn find_permission_by_name(&self, name: &str) -> Result<Option<PermissionRecord>> {
        Ok(self.permissions.find(|permission| permission.name == name))
    }

    /// Resolve a set of permission ids to their active records
    pub async fn find_permissions_by_ids(
        &self,
        permission_ids: &[i64],
    ) -> Result<Vec<PermissionRecord>> {
        let mut permissions = self
            .permissions
            .filter(|permission| permission.is_active && permission_ids.contains(&permission.id));
        permissions.sort_by_key(|permission| permission.id);
        Ok(permissions)
    }

    /// List active permissions
    pub async fn list_active_permissions(&self) -> Result<Vec<PermissionRecord>> {
        let mut permissions = self.permissions.filter(|permission| permission.is_active);
        permissions.sort_by_key(|permission| permission.id);
        Ok(permissions)
    }

    /// List active permissions for a resource
    pub async fn find_permissions_by_resource(
        &self,
        resource: &str,
    ) -> Result<Vec<PermissionRecord>> {
        let mut permissions = self
            .permissions
            .filter(|permission| permission.is_active && permission.resource == resource);
        permissions.sort_by_key(|permission| permission.id);
        Ok(permissions)
    }

    /// Number of permission rows
    pub async fn count_permissions(&self) -> Result<usize> {
        Ok(self.permissions.len())
    }
}
