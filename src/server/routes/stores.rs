//! Store management endpoints
//!
//! Tenant-scoped CRUD. Created stores and owner profiles are mirrored into
//! the sibling store-management service; those calls are best-effort and
//! never fail the local operation.

use crate::core::models::{Store, User};
use crate::server::middleware::require_principal;
use crate::server::routes::to_user_response;
use crate::server::state::AppState;
use crate::utils::crypto::hash_password;
use crate::utils::error::{PlazaError, Result};
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

/// Register store routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/stores")
            .route("", web::get().to(list_stores))
            .route("", web::post().to(create_store))
            .route("/{id}", web::get().to(get_store))
            .route("/{id}", web::put().to(update_store))
            .route("/{id}", web::delete().to(delete_store))
            .route("/{id}/owner", web::post().to(create_store_owner)),
    );
}

/// Store payload accepted by create/update endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRequest {
    pub name: String,
    pub description: Option<String>,
    pub owner_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// Store payload returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub owner_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub plaza_id: i64,
    pub external_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Store> for StoreResponse {
    fn from(store: &Store) -> Self {
        Self {
            id: store.id,
            name: store.name.clone(),
            description: store.description.clone(),
            owner_name: store.owner_name.clone(),
            phone_number: store.phone_number.clone(),
            email: store.email.clone(),
            plaza_id: store.plaza_id,
            external_id: store.external_id.clone(),
            is_active: store.is_active,
            created_at: store.created_at,
            updated_at: store.updated_at,
        }
    }
}

/// Store owner payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreOwnerRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub phone_number: Option<String>,
}

async fn list_stores(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;

    let stores = state.storage.db().find_stores_by_plaza(plaza_id).await?;
    let response: Vec<StoreResponse> = stores.iter().map(StoreResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

async fn get_store(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;

    let store = state
        .storage
        .db()
        .find_store_by_id_and_plaza(path.into_inner(), plaza_id)
        .await?
        .ok_or_else(|| PlazaError::not_found("Store not found"))?;

    Ok(HttpResponse::Ok().json(StoreResponse::from(&store)))
}

async fn create_store(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<StoreRequest>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;
    let db = state.storage.db();
    let request = request.into_inner();

    if db
        .exists_store_by_name_and_plaza(&request.name, plaza_id)
        .await?
    {
        return Err(PlazaError::conflict("Store name already exists in plaza"));
    }

    let mut store = Store::new(&request.name, plaza_id);
    store.description = request.description.clone();
    store.owner_name = request.owner_name.clone();
    store.phone_number = request.phone_number.clone();
    store.email = request.email.clone();

    let mut store = db.create_store(store).await?;
    info!("Created store {} in plaza {}", store.id, plaza_id);

    // Mirror into the store-management system; failure is not fatal.
    let plaza = db.find_plaza_by_id(plaza_id).await?;
    let mut store_data = json!({
        "name": store.name,
        "description": store.description,
        "ownerName": store.owner_name,
        "phoneNumber": store.phone_number,
        "email": store.email,
        "storeId": store.id,
    });
    if let Some(plaza_external_id) = plaza.as_ref().and_then(|p| p.external_id.as_deref()) {
        store_data["plazaExternalId"] = json!(plaza_external_id);
    }

    match state.store_mgmt.create_store(&store_data).await {
        Ok(body) => {
            if let Some(external_id) = body.get("externalId").and_then(|v| v.as_str()) {
                store.external_id = Some(external_id.to_string());
                store = db.update_store(store).await?;
            }
        }
        Err(e) => {
            warn!(
                "Store created locally but store-management sync failed: {}",
                e
            );
        }
    }

    Ok(HttpResponse::Created().json(StoreResponse::from(&store)))
}

async fn update_store(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<StoreRequest>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;
    let db = state.storage.db();
    let request = request.into_inner();
    let store_id = path.into_inner();

    let mut store = db
        .find_store_by_id_and_plaza(store_id, plaza_id)
        .await?
        .ok_or_else(|| PlazaError::not_found("Store not found"))?;

    if db
        .exists_store_by_name_and_plaza_excluding(&request.name, plaza_id, store_id)
        .await?
    {
        return Err(PlazaError::conflict("Store name already exists in plaza"));
    }

    store.name = request.name.clone();
    store.description = request.description.clone();
    store.owner_name = request.owner_name.clone();
    store.phone_number = request.phone_number.clone();
    store.email = request.email.clone();

    let store = db.update_store(store).await?;
    Ok(HttpResponse::Ok().json(StoreResponse::from(&store)))
}

async fn delete_store(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;
    let db = state.storage.db();

    let mut store = db
        .find_store_by_id_and_plaza(path.into_inner(), plaza_id)
        .await?
        .ok_or_else(|| PlazaError::not_found("Store not found"))?;

    store.is_active = false;
    db.update_store(store).await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn create_store_owner(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<StoreOwnerRequest>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;
    let db = state.storage.db();
    let request = request.into_inner();

    let store = db
        .find_store_by_id_and_plaza(path.into_inner(), plaza_id)
        .await?
        .ok_or_else(|| PlazaError::not_found("Store not found"))?;

    if db.exists_user_by_username(&request.username).await? {
        return Err(PlazaError::conflict("Username already exists"));
    }
    if db.exists_user_by_email(&request.email).await? {
        return Err(PlazaError::conflict("Email already exists"));
    }

    let mut owner = User::new(
        &request.username,
        &request.email,
        hash_password(&request.password)?,
    );
    owner.first_name = request.first_name.clone();
    owner.last_name = request.last_name.clone();
    owner.phone_number = request.phone_number.clone();
    owner.plaza_id = Some(plaza_id);
    owner.store_id = Some(store.id);

    // STORE_OWNER when available, EMPLOYEE_GENERAL otherwise
    let role = match db.find_role_by_name("STORE_OWNER").await? {
        Some(role) => Some(role),
        None => db.find_role_by_name("EMPLOYEE_GENERAL").await?,
    };
    if let Some(role) = role {
        owner.role_ids = vec![role.id];
    }

    let owner = db.create_user(owner).await?;
    info!("Created store owner {} for store {}", owner.username, store.id);

    // Mirror the owner profile when both sides are known to the sibling.
    let plaza = db.find_plaza_by_id(plaza_id).await?;
    let plaza_external_id = plaza.as_ref().and_then(|p| p.external_id.as_deref());
    if let (Some(store_external_id), Some(plaza_external_id)) =
        (store.external_id.as_deref(), plaza_external_id)
    {
        let owner_data = json!({
            "username": owner.username,
            "email": owner.email,
            "firstName": owner.first_name,
            "lastName": owner.last_name,
            "phoneNumber": owner.phone_number,
            "storeExternalId": store_external_id,
            "plazaExternalId": plaza_external_id,
        });

        if let Err(e) = state
            .store_mgmt
            .create_store_owner_profile(store_external_id, &owner_data)
            .await
        {
            warn!(
                "Store owner created locally but store-management sync failed: {}",
                e
            );
        }
    }

    Ok(HttpResponse::Created().json(to_user_response(db, &owner).await?))
}
