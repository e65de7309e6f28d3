//! Bulletin record

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A daily bulletin published inside a plaza
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bulletin {
    /// Bulletin ID
    pub id: i64,
    /// Title
    pub title: String,
    /// Body text
    pub content: String,
    /// Date the bulletin applies to
    pub publication_date: NaiveDate,
    /// Plaza the bulletin belongs to
    pub plaza_id: i64,
    /// User that created the bulletin
    pub created_by: i64,
    /// Soft-delete flag
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Bulletin {
    /// Create a new active bulletin
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        publication_date: NaiveDate,
        plaza_id: i64,
        created_by: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title: title.into(),
            content: content.into(),
            publication_date,
            plaza_id,
            created_by,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
