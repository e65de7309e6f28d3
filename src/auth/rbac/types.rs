//! RBAC type definitions

use std::collections::HashSet;

/// Role definition
#[derive(Debug, Clone)]
pub struct Role {
    /// Role name
    pub name: String,
    /// Role description
    pub description: String,
    /// Permissions granted by this role
    pub permissions: HashSet<String>,
    /// Whether this is a built-in role
    pub is_system: bool,
}

/// Permission definition
#[derive(Debug, Clone)]
pub struct Permission {
    /// Permission name
    pub name: String,
    /// Permission description
    pub description: String,
    /// Resource this permission applies to
    pub resource: String,
    /// Action this permission allows
    pub action: String,
    /// Whether this is a built-in permission
    pub is_system: bool,
}

impl Permission {
    /// Canonical `RESOURCE:ACTION` permission string
    pub fn full_permission(&self) -> String {
        format!("{}:{}", self.resource, self.action)
    }
}
