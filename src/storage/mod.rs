//! Storage layer for the gateway
//!
//! This module provides data persistence for the plaza domain. Records live
//! in an in-process, thread-safe table store behind the same async repository
//! interface an external database would expose.

pub mod database;

use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// Main storage layer
#[derive(Debug, Clone)]
pub struct StorageLayer {
    /// Database tables
    pub database: Arc<database::Database>,
}

impl StorageLayer {
    /// Create a new storage layer
    pub fn new() -> Result<Self> {
        info!("Initializing storage layer");

        let database = Arc::new(database::Database::new());

        info!("Storage layer initialized successfully");
        Ok(Self { database })
    }

    /// Get the database
    pub fn db(&self) -> &database::Database {
        &self.database
    }
}

impl Default for StorageLayer {
    fn default() -> Self {
        Self {
            database: Arc::new(database::Database::new()),
        }
    }
}
