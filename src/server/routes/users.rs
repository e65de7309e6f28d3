//! User management endpoints
//!
//! Tenant-scoped CRUD plus the `externo` machine route used by the sibling
//! system service to provision manager accounts.

use crate::core::models::User;
use crate::server::middleware::require_principal;
use crate::server::routes::{UserRequest, to_user_response};
use crate::server::state::AppState;
use crate::utils::crypto::hash_password;
use crate::utils::error::{PlazaError, Result};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// Register user routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/externo", web::post().to(create_user_from_external))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}

async fn list_users(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;
    let db = state.storage.db();

    let users = db.find_users_by_plaza(plaza_id).await?;
    let mut response = Vec::with_capacity(users.len());
    for user in &users {
        response.push(to_user_response(db, user).await?);
    }

    Ok(HttpResponse::Ok().json(response))
}

async fn get_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;
    let db = state.storage.db();

    let user = db
        .find_user_by_id_and_plaza(path.into_inner(), plaza_id)
        .await?
        .ok_or_else(|| PlazaError::not_found("User not found"))?;

    Ok(HttpResponse::Ok().json(to_user_response(db, &user).await?))
}

async fn create_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<UserRequest>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    // New accounts always land in the caller's plaza.
    let plaza_id = principal.require_plaza()?;
    let db = state.storage.db();
    let request = request.into_inner();

    if db.exists_user_by_username(&request.username).await? {
        return Err(PlazaError::conflict("Username already exists"));
    }
    if db.exists_user_by_email(&request.email).await? {
        return Err(PlazaError::conflict("Email already exists"));
    }
    if !db.exists_active_plaza(plaza_id).await? {
        return Err(PlazaError::validation("Plaza is not active"));
    }

    let password = request
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| PlazaError::validation("Password is required"))?;

    let mut user = User::new(&request.username, &request.email, hash_password(password)?);
    user.first_name = request.first_name.clone();
    user.last_name = request.last_name.clone();
    user.phone_number = request.phone_number.clone();
    user.plaza_id = Some(plaza_id);
    if let Some(role_ids) = &request.role_ids {
        user.role_ids = db
            .find_roles_by_ids(role_ids)
            .await?
            .into_iter()
            .map(|role| role.id)
            .collect();
    }

    let user = db.create_user(user).await?;
    info!("Created user {} in plaza {}", user.username, plaza_id);

    Ok(HttpResponse::Created().json(to_user_response(db, &user).await?))
}

/// Payload sent by the sibling system service when provisioning accounts
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalUserRequest {
    pub external_id: String,
    /// Full display name; split into first/last on a best-effort basis
    pub nombre: Option<String>,
    pub email: Option<String>,
    /// Role name to assign, when it exists
    pub rol: Option<String>,
    pub plaza_external_id: String,
    pub phone_number: Option<String>,
}

async fn create_user_from_external(
    state: web::Data<AppState>,
    request: web::Json<ExternalUserRequest>,
) -> Result<HttpResponse> {
    let db = state.storage.db();
    let request = request.into_inner();

    if request.external_id.is_empty() || request.plaza_external_id.is_empty() {
        return Err(PlazaError::validation(
            "externalId and plazaExternalId are required",
        ));
    }

    let plaza = db
        .find_plaza_by_external_id(&request.plaza_external_id)
        .await?
        .ok_or_else(|| PlazaError::validation("Plaza not found with the provided external ID"))?;

    // Idempotent by external id: re-sending the same account returns it.
    if let Some(existing) = db.find_user_by_external_id(&request.external_id).await? {
        return Ok(HttpResponse::Ok().json(to_user_response(db, &existing).await?));
    }

    let email = request.email.clone().unwrap_or_default();
    let mut username = match email.split_once('@') {
        Some((local, _)) if !local.is_empty() => local.to_string(),
        _ => request.external_id.clone(),
    };
    if db.exists_user_by_username(&username).await? {
        let suffix: String = Uuid::new_v4().to_string().chars().take(6).collect();
        username = format!("{}_{}", username, suffix);
    }

    // External accounts get a random password; access is via the sibling
    // system until a reset.
    let raw_password = Uuid::new_v4().to_string();

    let mut user = User::new(&username, &email, hash_password(&raw_password)?);
    user.external_id = Some(request.external_id.clone());
    user.phone_number = request.phone_number.clone();
    user.plaza_id = Some(plaza.id);

    match request.nombre.as_deref().map(str::trim) {
        Some(nombre) if !nombre.is_empty() => match nombre.split_once(' ') {
            Some((first, rest)) => {
                user.first_name = first.to_string();
                user.last_name = rest.to_string();
            }
            None => {
                user.first_name = nombre.to_string();
            }
        },
        _ => {
            user.first_name = "External".to_string();
            user.last_name = "User".to_string();
        }
    }

    if let Some(role_name) = &request.rol {
        if let Some(role) = db.find_role_by_name(role_name).await? {
            user.role_ids = vec![role.id];
        }
    }

    let user = db.create_user(user).await?;
    info!(
        "Provisioned external user {} for plaza {}",
        user.username, plaza.id
    );

    Ok(HttpResponse::Created().json(to_user_response(db, &user).await?))
}

async fn update_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UserRequest>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;
    let db = state.storage.db();
    let request = request.into_inner();
    let user_id = path.into_inner();

    let mut user = db
        .find_user_by_id_and_plaza(user_id, plaza_id)
        .await?
        .ok_or_else(|| PlazaError::not_found("User not found"))?;

    // Conflict checks exclude the user being updated.
    if db
        .exists_user_by_username_excluding(&request.username, user_id)
        .await?
    {
        return Err(PlazaError::conflict("Username already exists"));
    }
    if db
        .exists_user_by_email_excluding(&request.email, user_id)
        .await?
    {
        return Err(PlazaError::conflict("Email already exists"));
    }

    user.username = request.username.clone();
    user.email = request.email.clone();
    user.first_name = request.first_name.clone();
    user.last_name = request.last_name.clone();
    user.phone_number = request.phone_number.clone();
    // Password is re-hashed only when the request carries a new one.
    if let Some(password) = request.password.as_deref().filter(|p| !p.is_empty()) {
        user.password_hash = hash_password(password)?;
    }
    if let Some(role_ids) = &request.role_ids {
        if !role_ids.is_empty() {
            user.role_ids = db
                .find_roles_by_ids(role_ids)
                .await?
                .into_iter()
                .map(|role| role.id)
                .collect();
        }
    }

    let user = db.update_user(user).await?;
    Ok(HttpResponse::Ok().json(to_user_response(db, &user).await?))
}

async fn delete_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;
    let db = state.storage.db();

    let mut user = db
        .find_user_by_id_and_plaza(path.into_inner(), plaza_id)
        .await?
        .ok_or_else(|| PlazaError::not_found("User not found"))?;

    user.is_active = false;
    db.update_user(user).await?;

    Ok(HttpResponse::NoContent().finish())
}
