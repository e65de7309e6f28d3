//! User record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account scoped to a plaza
///
/// `plaza_id = None` marks a platform-level actor whose queries are not
/// tenant-filtered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: i64,
    /// Username (unique)
    pub username: String,
    /// Email address (unique)
    pub email: String,
    /// Argon2 password hash, never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Phone number
    pub phone_number: Option<String>,
    /// Identifier in the sibling system-owner service
    pub external_id: Option<String>,
    /// Tenant the user belongs to
    pub plaza_id: Option<i64>,
    /// Store the user is attached to (store owners)
    pub store_id: Option<i64>,
    /// Assigned role ids
    pub role_ids: Vec<i64>,
    /// Soft-delete flag
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            first_name: String::new(),
            last_name: String::new(),
            phone_number: None,
            external_id: None,
            plaza_id: None,
            store_id: None,
            role_ids: Vec::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
