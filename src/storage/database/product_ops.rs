//! Product table operations

use crate::core::models::Product;
use crate::utils::error::{PlazaError, Result};
use chrono::Utc;
use tracing::debug;

use super::Database;

impl Database {
    /// Create a new product
    pub async fn create_product(&self, product: Product) -> Result<Product> {
        debug!("Creating product: {}", product.name);
        Ok(self.products.insert(product, |row, id| row.id = id))
    }

    /// Update an existing product, bumping its update timestamp
    pub async fn update_product(&self, mut product: Product) -> Result<Product> {
        debug!("Updating product: {}", product.id);
        product.updated_at = Utc::now();

        if self.products.replace(product.id, product.clone()) {
            Ok(product)
        } else {
            Err(PlazaError::not_found(format!(
                "Product not found: {}",
                product.id
            )))
        }
    }

    /// Find an active product by id inside a plaza
    pub async fn find_product_by_id_and_plaza(
        &self,
        product_id: i64,
        plaza_id: i64,
    ) -> Result<Option<Product>> {
        debug!("Finding product {} in plaza {}", product_id, plaza_id);
        Ok(self.products.find(|product| {
            product.id == product_id && product.plaza_id == plaza_id && product.is_active
        }))
    }

    /// List active products of a plaza, ordered by category then name
    pub async fn find_products_by_plaza(&self, plaza_id: i64) -> Result<Vec<Product>> {
        debug!("Listing products of plaza {}", plaza_id);
        let mut products = self
            .products
            .filter(|product| product.plaza_id == plaza_id && product.is_active);
        products.sort_by(|a, b| a.category.cmp(&b.category).then(a.name.cmp(&b.name)));
        Ok(products)
    }

    /// List currently available products of a plaza
    pub async fn find_available_products_by_plaza(&self, plaza_id: i64) -> Result<Vec<Product>> {
        let mut products = self.products.filter(|product| {
            product.plaza_id == plaza_id && product.is_active && product.is_available
        });
        products.sort_by(|a, b| a.category.cmp(&b.category).then(a.name.cmp(&b.name)));
        Ok(products)
    }

    /// Distinct product categories in a plaza, sorted
    pub async fn product_categories_by_plaza(&self, plaza_id: i64) -> Result<Vec<String>> {
        let mut categories: Vec<String> = self
            .products
            .filter(|product| product.plaza_id == plaza_id && product.is_active)
            .into_iter()
            .map(|product| product.category)
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }
}
