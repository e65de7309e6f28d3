//! Product record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product listed in a plaza's market price board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID
    pub id: i64,
    /// Product name
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// Category, e.g. "Vegetables"
    pub category: String,
    /// Current price
    pub price: f64,
    /// Pricing unit, e.g. "kg"
    pub unit: Option<String>,
    /// Whether the product is currently offered
    pub is_available: bool,
    /// Plaza the product belongs to
    pub plaza_id: i64,
    /// Soft-delete flag
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a new active product
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: f64, plaza_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            description: None,
            category: category.into(),
            price,
            unit: None,
            is_available: true,
            plaza_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
