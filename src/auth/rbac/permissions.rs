//! Permission checking methods

use std::collections::HashSet;

use super::system::RbacSystem;

impl RbacSystem {
    /// Effective permission union for a set of role names, as
    /// `RESOURCE:ACTION` strings
    pub fn permissions_for_roles(&self, role_names: &[String]) -> HashSet<String> {
        let mut effective = HashSet::new();

        for role_name in role_names {
            if let Some(role) = self.roles.get(role_name) {
                for permission_name in &role.permissions {
                    if let Some(permission) = self.permissions.get(permission_name) {
                        effective.insert(permission.full_permission());
                    }
                }
            }
        }

        effective
    }

    /// Check if the user holds all required permissions
    pub fn check_permissions(
        &self,
        user_permissions: &[String],
        required_permissions: &[String],
    ) -> bool {
        let user_perms: HashSet<&String> = user_permissions.iter().collect();

        if user_perms.iter().any(|p| p.as_str() == "*") {
            return true;
        }

        required_permissions
            .iter()
            .all(|perm| user_perms.contains(&perm))
    }

    /// Check if the user holds any of the required permissions
    pub fn check_any_permission(
        &self,
        user_permissions: &[String],
        required_permissions: &[String],
    ) -> bool {
        let user_perms: HashSet<&String> = user_permissions.iter().collect();

        if user_perms.iter().any(|p| p.as_str() == "*") {
            return true;
        }

        required_permissions
            .iter()
            .any(|perm| user_perms.contains(&perm))
    }

    /// Check a (resource, action) pair against the user's permissions
    pub fn check_resource_permission(
        &self,
        user_permissions: &[String],
        resource: &str,
        action: &str,
    ) -> bool {
        let required_permission = format!("{}:{}", resource, action);
        self.check_permissions(user_permissions, &[required_permission])
    }
}
