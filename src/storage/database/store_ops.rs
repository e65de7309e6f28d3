//! Store table operations

use crate::core::models::Store;
use crate::utils::error::{PlazaError, Result};
use chrono::Utc;
use tracing::debug;

use super::Database;

impl Database {
    /// Create a new store
    pub async fn create_store(&self, store: Store) -> Result<Store> {
        debug!("Creating store: {}", store.name);
        Ok(self.stores.insert(store, |row, id| row.id = id))
    }

    /// Update an existing store, bumping its update timestamp
    pub async fn update_store(&self, mut store: Store) -> Result<Store> {
        debug!("Updating store: {}", store.id);
        store.updated_at = Utc::now();

        if self.stores.replace(store.id, store.clone()) {
            Ok(store)
        } else {
            Err(PlazaError::not_found(format!(
                "Store not found: {}",
                store.id
            )))
        }
    }

    /// Find an active store by id inside a plaza
    pub async fn find_store_by_id_and_plaza(
        &self,
        store_id: i64,
        plaza_id: i64,
    ) -> Result<Option<Store>> {
        debug!("Finding store {} in plaza {}", store_id, plaza_id);
        Ok(self.stores.find(|store| {
            store.id == store_id && store.plaza_id == plaza_id && store.is_active
        }))
    }

    /// List active stores of a plaza
    pub async fn find_stores_by_plaza(&self, plaza_id: i64) -> Result<Vec<Store>> {
        debug!("Listing stores of plaza {}", plaza_id);
        let mut stores = self
            .stores
            .filter(|store| store.plaza_id == plaza_id && store.is_active);
        stores.sort_by_key(|store| store.id);
        Ok(stores)
    }

    /// Check whether a store name is taken within a plaza
    pub async fn exists_store_by_name_and_plaza(&self, name: &str, plaza_id: i64) -> Result<bool> {
        Ok(self
            .stores
            .any(|store| store.name == name && store.plaza_id == plaza_id && store.is_active))
    }

    /// Check whether another store in the plaza already holds this name
    pub async fn exists_store_by_name_and_plaza_excluding(
        &self,
        name: &str,
        plaza_id: i64,
        store_id: i64,
    ) -> Result<bool> {
        Ok(self.stores.any(|store| {
            store.name == name
                && store.plaza_id == plaza_id
                && store.id != store_id
                && store.is_active
        }))
    }
}
