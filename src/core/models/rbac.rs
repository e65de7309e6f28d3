//! Persisted role and permission records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named role granting a set of permissions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRecord {
    /// Role ID
    pub id: i64,
    /// Role name (unique), e.g. "MANAGER"
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// Granted permission ids
    pub permission_ids: Vec<i64>,
    /// Soft-delete flag
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl RoleRecord {
    /// Create a new active role
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            description: Some(description.into()),
            permission_ids: Vec::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A permission over a (resource, action) pair
///
/// Uniqueness is the composite (resource, action) key; `name` is the
/// conventional `RESOURCE_ACTION` spelling of that pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionRecord {
    /// Permission ID
    pub id: i64,
    /// Permission name (unique), e.g. "USERS_CREATE"
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// Resource, e.g. "USERS"
    pub resource: String,
    /// Action, e.g. "CREATE"
    pub action: String,
    /// Soft-delete flag
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl PermissionRecord {
    /// Create a new active permission
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            description: Some(description.into()),
            resource: resource.into(),
            action: action.into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Canonical `RESOURCE:ACTION` permission string
    pub fn full_permission(&self) -> String {
        format!("{}:{}", self.resource, self.action)
    }
}
