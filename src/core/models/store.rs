//! Store record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A store inside a plaza. Store names are unique within their plaza.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    /// Store ID
    pub id: i64,
    /// Store name (unique per plaza)
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// Owner display name
    pub owner_name: Option<String>,
    /// Contact phone number
    pub phone_number: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Plaza the store belongs to
    pub plaza_id: i64,
    /// Identifier in the sibling store-management service
    pub external_id: Option<String>,
    /// Soft-delete flag
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Store {
    /// Create a new active store in the given plaza
    pub fn new(name: impl Into<String>, plaza_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            description: None,
            owner_name: None,
            phone_number: None,
            email: None,
            plaza_id,
            external_id: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
