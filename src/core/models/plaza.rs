//! Plaza (tenant) record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A plaza is the tenant boundary: users, stores, bulletins and products all
/// belong to exactly one plaza.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plaza {
    /// Plaza ID
    pub id: i64,
    /// Plaza name (unique)
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// Contact phone number
    pub phone_number: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Daily opening time, e.g. "09:00"
    pub opening_hours: Option<String>,
    /// Daily closing time, e.g. "22:00"
    pub closing_hours: Option<String>,
    /// Identifier in the sibling system-owner service
    pub external_id: Option<String>,
    /// Soft-delete flag
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Plaza {
    /// Create a new plaza with the given name
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            description: None,
            address: None,
            phone_number: None,
            email: None,
            opening_hours: None,
            closing_hours: None,
            external_id: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
