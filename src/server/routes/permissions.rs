//! Permission lookup endpoints
//!
//! Read-only: the permission catalog is seeded at startup and roles reference
//! it by id.

use crate::core::models::PermissionRecord;
use crate::server::state::AppState;
use crate::utils::error::{PlazaError, Result};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Register permission routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/permissions")
            .route("", web::get().to(list_permissions))
            .route("/resource/{resource}", web::get().to(permissions_by_resource))
            .route("/{id}", web::get().to(get_permission)),
    );
}

/// Permission payload returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub resource: String,
    pub action: String,
    pub full_permission: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PermissionRecord> for PermissionResponse {
    fn from(permission: &PermissionRecord) -> Self {
        Self {
            id: permission.id,
            name: permission.name.clone(),
            description: permission.description.clone(),
            resource: permission.resource.clone(),
            action: permission.action.clone(),
            full_permission: permission.full_permission(),
            is_active: permission.is_active,
            created_at: permission.created_at,
            updated_at: permission.updated_at,
        }
    }
}

async fn list_permissions(state: web::Data<AppState>) -> Result<HttpResponse> {
    let permissions = state.storage.db().list_active_permissions().await?;
    let response: Vec<PermissionResponse> =
        permissions.iter().map(PermissionResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

async fn get_permission(state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse> {
    let permission = state
        .storage
        .db()
        .find_permission_by_id(path.into_inner())
        .await?
        .filter(|permission| permission.is_active)
        .ok_or_else(|| PlazaError::not_found("Permission not found"))?;

    Ok(HttpResponse::Ok().json(PermissionResponse::from(&permission)))
}

async fn permissions_by_resource(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let permissions = state
        .storage
        .db()
        .find_permissions_by_resource(&path.into_inner())
        .await?;
    let response: Vec<PermissionResponse> =
        permissions.iter().map(PermissionResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}
