//! Security identity attached to authenticated requests
//!
//! The principal is an explicit mapping from the persisted [`User`] record,
//! not the record itself: handlers only ever see the identity fields an
//! authorization decision needs, with roles and permissions resolved eagerly
//! so no storage access happens mid-request.
//!
//! [`User`]: crate::core::models::User

use crate::core::models::{PermissionRecord, Plaza, RoleRecord, User};
use crate::utils::error::{PlazaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Authenticated identity for the current request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// User ID
    pub user_id: i64,
    /// Username
    pub username: String,
    /// Role names held by the user
    pub roles: Vec<String>,
    /// Effective permission union over all roles, as `RESOURCE:ACTION`
    pub permissions: HashSet<String>,
    /// Tenant the user is scoped to; `None` marks a platform-level actor
    pub plaza_id: Option<i64>,
    /// Tenant display name
    pub plaza_name: Option<String>,
}

impl Principal {
    /// Build a principal from a stored user and its resolved roles
    pub fn from_user(
        user: &User,
        plaza: Option<&Plaza>,
        roles: &[RoleRecord],
        permissions: &[PermissionRecord],
    ) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            roles: roles.iter().map(|r| r.name.clone()).collect(),
            permissions: permissions.iter().map(|p| p.full_permission()).collect(),
            plaza_id: user.plaza_id,
            plaza_name: plaza.map(|p| p.name.clone()),
        }
    }

    /// Check whether the principal holds the given role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Check whether the principal holds at least one of the given roles
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    /// Check whether the principal holds the given `RESOURCE:ACTION` permission
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Tenant filter for tenant-scoped handlers
    ///
    /// Fails for platform-level actors: scoped data access always derives the
    /// tenant from the authenticated identity, never from client input.
    pub fn require_plaza(&self) -> Result<i64> {
        self.plaza_id.ok_or_else(|| {
            PlazaError::tenant_mismatch(format!(
                "user '{}' is not assigned to a plaza",
                self.username
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal_with_roles(roles: &[&str], plaza_id: Option<i64>) -> Principal {
        Principal {
            user_id: 7,
            username: "security1".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            permissions: ["BULLETINS:READ", "SECURITY:ACCESS"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            plaza_id,
            plaza_name: plaza_id.map(|_| "Centro Comercial Plaza Central".to_string()),
        }
    }

    #[test]
    fn test_role_checks() {
        let principal = principal_with_roles(&["EMPLOYEE_SECURITY"], Some(1));

        assert!(principal.has_role("EMPLOYEE_SECURITY"));
        assert!(!principal.has_role("MANAGER"));
        assert!(principal.has_any_role(&["MANAGER", "EMPLOYEE_SECURITY"]));
        assert!(!principal.has_any_role(&["MANAGER", "ADMIN"]));
    }

    #[test]
    fn test_permission_checks() {
        let principal = principal_with_roles(&["EMPLOYEE_SECURITY"], Some(1));

        assert!(principal.has_permission("SECURITY:ACCESS"));
        assert!(!principal.has_permission("USERS:DELETE"));
    }

    #[test]
    fn test_require_plaza() {
        let scoped = principal_with_roles(&["MANAGER"], Some(1));
        assert_eq!(scoped.require_plaza().unwrap(), 1);

        let platform = principal_with_roles(&["ADMIN"], None);
        assert!(matches!(
            platform.require_plaza(),
            Err(PlazaError::TenantMismatch(_))
        ));
    }
}
