//! Product endpoints
//!
//! The plaza's market price board: readable by all employee roles, writable
//! by managers.

use crate::core::models::Product;
use crate::server::middleware::require_principal;
use crate::server::state::AppState;
use crate::utils::error::{PlazaError, Result};
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Register product routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/products")
            .route("", web::get().to(list_products))
            .route("", web::post().to(create_product))
            .route("/available", web::get().to(available_products))
            .route("/categories", web::get().to(product_categories))
            .route("/{id}", web::get().to(get_product))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}", web::delete().to(delete_product)),
    );
}

/// Product payload accepted by create/update endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: f64,
    pub unit: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

/// Product payload returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: f64,
    pub unit: Option<String>,
    pub is_available: bool,
    pub plaza_id: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price,
            unit: product.unit.clone(),
            is_available: product.is_available,
            plaza_id: product.plaza_id,
            is_active: product.is_active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

async fn list_products(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;

    let products = state.storage.db().find_products_by_plaza(plaza_id).await?;
    let response: Vec<ProductResponse> = products.iter().map(ProductResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

async fn available_products(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;

    let products = state
        .storage
        .db()
        .find_available_products_by_plaza(plaza_id)
        .await?;
    let response: Vec<ProductResponse> = products.iter().map(ProductResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

async fn product_categories(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;

    let categories = state
        .storage
        .db()
        .product_categories_by_plaza(plaza_id)
        .await?;
    Ok(HttpResponse::Ok().json(categories))
}

async fn get_product(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;

    let product = state
        .storage
        .db()
        .find_product_by_id_and_plaza(path.into_inner(), plaza_id)
        .await?
        .ok_or_else(|| PlazaError::not_found("Product not found"))?;

    Ok(HttpResponse::Ok().json(ProductResponse::from(&product)))
}

async fn create_product(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<ProductRequest>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;
    let request = request.into_inner();

    if request.price < 0.0 {
        return Err(PlazaError::validation("Price cannot be negative"));
    }

    let mut product = Product::new(&request.name, &request.category, request.price, plaza_id);
    product.description = request.description.clone();
    product.unit = request.unit.clone();
    product.is_available = request.is_available;

    let product = state.storage.db().create_product(product).await?;
    Ok(HttpResponse::Created().json(ProductResponse::from(&product)))
}

async fn update_product(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<ProductRequest>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;
    let db = state.storage.db();
    let request = request.into_inner();

    if request.price < 0.0 {
        return Err(PlazaError::validation("Price cannot be negative"));
    }

    let mut product = db
        .find_product_by_id_and_plaza(path.into_inner(), plaza_id)
        .await?
        .ok_or_else(|| PlazaError::not_found("Product not found"))?;

    product.name = request.name.clone();
    product.description = request.description.clone();
    product.category = request.category.clone();
    product.price = request.price;
    product.unit = request.unit.clone();
    product.is_available = request.is_available;

    let product = db.update_product(product).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(&product)))
}

async fn delete_product(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;
    let db = state.storage.db();

    let mut product = db
        .find_product_by_id_and_plaza(path.into_inner(), plaza_id)
        .await?
        .ok_or_else(|| PlazaError::not_found("Product not found"))?;

    product.is_active = false;
    db.update_product(product).await?;

    Ok(HttpResponse::NoContent().finish())
}
