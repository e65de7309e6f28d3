//! Plaza table operations

use crate::core::models::Plaza;
use crate::utils::error::{PlazaError, Result};
use chrono::Utc;
use tracing::debug;

use super::Database;

impl Database {
    /// Create a new plaza
    pub async fn create_plaza(&self, plaza: Plaza) -> Result<Plaza> {
        debug!("Creating plaza: {}", plaza.name);
        Ok(self.plazas.insert(plaza, |row, id| row.id = id))
    }

    /// Update an existing plaza, bumping its update timestamp
    pub async fn update_plaza(&self, mut plaza: Plaza) -> Result<Plaza> {
        debug!("Updating plaza: {}", plaza.id);
        plaza.updated_at = Utc::now();

        if self.plazas.replace(plaza.id, plaza.clone()) {
            Ok(plaza)
        } else {
            Err(PlazaError::not_found(format!(
                "Plaza not found: {}",
                plaza.id
            )))
        }
    }

    /// Find plaza by ID, active or not
    pub async fn find_plaza_by_id(&self, plaza_id: i64) -> Result<Option<Plaza>> {
        debug!("Finding plaza by ID: {}", plaza_id);
        Ok(self.plazas.get(plaza_id))
    }

    /// Find an active plaza by ID
    pub async fn find_active_plaza_by_id(&self, plaza_id: i64) -> Result<Option<Plaza>> {
        Ok(self
            .plazas
            .find(|plaza| plaza.id == plaza_id && plaza.is_active))
    }

    /// Find plaza by name
    pub async fn find_plaza_by_name(&self, name: &str) -> Result<Option<Plaza>> {
        debug!("Finding plaza by name: {}", name);
        Ok(self.plazas.find(|plaza| plaza.name == name))
    }

    /// Find plaza by the sibling system's external ID
    pub async fn find_plaza_by_external_id(&self, external_id: &str) -> Result<Option<Plaza>> {
        debug!("Finding plaza by external ID: {}", external_id);
        Ok(self
            .plazas
            .find(|plaza| plaza.external_id.as_deref() == Some(external_id)))
    }

    /// List active plazas
    pub async fn list_active_plazas(&self) -> Result<Vec<Plaza>> {
        let mut plazas = self.plazas.filter(|plaza| plaza.is_active);
        plazas.sort_by_key(|plaza| plaza.id);
        Ok(plazas)
    }

    /// Search active plazas by case-insensitive name substring
    pub async fn search_plazas_by_name(&self, term: &str) -> Result<Vec<Plaza>> {
        debug!("Searching plazas by name: {}", term);
        let term = term.to_lowercase();
        let mut plazas = self
            .plazas
            .filter(|plaza| plaza.is_active && plaza.name.to_lowercase().contains(&term));
        plazas.sort_by_key(|plaza| plaza.id);
        Ok(plazas)
    }

    /// Check whether an active plaza with this ID exists
    pub async fn exists_active_plaza(&self, plaza_id: i64) -> Result<bool> {
        Ok(self
            .plazas
            .any(|plaza| plaza.id == plaza_id && plaza.is_active))
    }

    /// Number of plaza rows
    pub async fn count_plazas(&self) -> Result<usize> {
        Ok(self.plazas.len())
    }
}
