//! Role management endpoints

use crate::core::models::RoleRecord;
use crate::server::routes::RoleResponse;
use crate::server::state::AppState;
use crate::utils::error::{PlazaError, Result};
use actix_web::{HttpResponse, web};
use serde::Deserialize;

/// Register role routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/roles")
            .route("", web::get().to(list_roles))
            .route("", web::post().to(create_role))
            .route("/{id}", web::get().to(get_role))
            .route("/{id}", web::put().to(update_role))
            .route("/{id}", web::delete().to(delete_role)),
    );
}

/// Role payload accepted by create/update endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    pub name: String,
    pub description: Option<String>,
    pub permission_ids: Option<Vec<i64>>,
}

async fn list_roles(state: web::Data<AppState>) -> Result<HttpResponse> {
    let roles = state.storage.db().list_active_roles().await?;
    let response: Vec<RoleResponse> = roles.iter().map(RoleResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

async fn get_role(state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse> {
    let role = state
        .storage
        .db()
        .find_role_by_id(path.into_inner())
        .await?
        .filter(|role| role.is_active)
        .ok_or_else(|| PlazaError::not_found("Role not found"))?;

    Ok(HttpResponse::Ok().json(RoleResponse::from(&role)))
}

async fn create_role(
    state: web::Data<AppState>,
    request: web::Json<RoleRequest>,
) -> Result<HttpResponse> {
    let db = state.storage.db();
    let request = request.into_inner();

    if db.find_role_by_name(&request.name).await?.is_some() {
        return Err(PlazaError::conflict("Role name already exists"));
    }

    let mut role = RoleRecord::new(&request.name, request.description.clone().unwrap_or_default());
    role.description = request.description.clone();
    if let Some(permission_ids) = &request.permission_ids {
        role.permission_ids = db
            .find_permissions_by_ids(permission_ids)
            .await?
            .into_iter()
            .map(|permission| permission.id)
            .collect();
    }

    let role = db.create_role(role).await?;
    Ok(HttpResponse::Created().json(RoleResponse::from(&role)))
}

async fn update_role(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    request: web::Json<RoleRequest>,
) -> Result<HttpResponse> {
    let db = state.storage.db();
    let request = request.into_inner();
    let role_id = path.into_inner();

    let mut role = db
        .find_role_by_id(role_id)
        .await?
        .filter(|role| role.is_active)
        .ok_or_else(|| PlazaError::not_found("Role not found"))?;

    if let Some(existing) = db.find_role_by_name(&request.name).await? {
        if existing.id != role_id {
            return Err(PlazaError::conflict("Role name already exists"));
        }
    }

    role.name = request.name.clone();
    role.description = request.description.clone();
    if let Some(permission_ids) = &request.permission_ids {
        role.permission_ids = db
            .find_permissions_by_ids(permission_ids)
            .await?
            .into_iter()
            .map(|permission| permission.id)
            .collect();
    }

    let role = db.update_role(role).await?;
    Ok(HttpResponse::Ok().json(RoleResponse::from(&role)))
}

async fn delete_role(state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse> {
    let db = state.storage.db();

    let mut role = db
        .find_role_by_id(path.into_inner())
        .await?
        .filter(|role| role.is_active)
        .ok_or_else(|| PlazaError::not_found("Role not found"))?;

    role.is_active = false;
    db.update_role(role).await?;

    Ok(HttpResponse::NoContent().finish())
}
