//! Bulletin table operations

use crate::core::models::Bulletin;
use crate::utils::error::{PlazaError, Result};
use chrono::{NaiveDate, Utc};
use tracing::debug;

use super::Database;

impl Database {
    /// Create a new bulletin
    pub async fn create_bulletin(&self, bulletin: Bulletin) -> Result<Bulletin> {
        debug!("Creating bulletin: {}", bulletin.title);
        Ok(self.bulletins.insert(bulletin, |row, id| row.id = id))
    }

    /// Update an existing bulletin, bumping its update timestamp
    pub async fn update_bulletin(&self, mut bulletin: Bulletin) -> Result<Bulletin> {
        debug!("Updating bulletin: {}", bulletin.id);
        bulletin.updated_at = Utc::now();

        if self.bulletins.replace(bulletin.id, bulletin.clone()) {
            Ok(bulletin)
        } else {
            Err(PlazaError::not_found(format!(
                "Bulletin not found: {}",
                bulletin.id
            )))
        }
    }

    /// Find an active bulletin by id inside a plaza
    pub async fn find_bulletin_by_id_and_plaza(
        &self,
        bulletin_id: i64,
        plaza_id: i64,
    ) -> Result<Option<Bulletin>> {
        debug!("Finding bulletin {} in plaza {}", bulletin_id, plaza_id);
        Ok(self.bulletins.find(|bulletin| {
            bulletin.id == bulletin_id && bulletin.plaza_id == plaza_id && bulletin.is_active
        }))
    }

    /// List active bulletins of a plaza, newest publication first
    pub async fn find_bulletins_by_plaza(&self, plaza_id: i64) -> Result<Vec<Bulletin>> {
        debug!("Listing bulletins of plaza {}", plaza_id);
        let mut bulletins = self
            .bulletins
            .filter(|bulletin| bulletin.plaza_id == plaza_id && bulletin.is_active);
        bulletins.sort_by(|a, b| b.publication_date.cmp(&a.publication_date));
        Ok(bulletins)
    }

    /// List active bulletins of a plaza for a specific date
    pub async fn find_bulletins_by_plaza_and_date(
        &self,
        plaza_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Bulletin>> {
        debug!("Listing bulletins of plaza {} for {}", plaza_id, date);
        let mut bulletins = self.bulletins.filter(|bulletin| {
            bulletin.plaza_id == plaza_id && bulletin.is_active && bulletin.publication_date == date
        });
        bulletins.sort_by_key(|bulletin| bulletin.id);
        Ok(bulletins)
    }

    /// Number of bulletin rows
    pub async fn count_bulletins(&self) -> Result<usize> {
        Ok(self.bulletins.len())
    }
}
