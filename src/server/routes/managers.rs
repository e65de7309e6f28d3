//! Manager registration endpoints (inter-service)
//!
//! Used by the sibling system service to create manager accounts and to look
//! up whether a plaza already has one.

use crate::core::models::User;
use crate::server::routes::{UserRequest, to_user_response};
use crate::server::state::AppState;
use crate::utils::crypto::hash_password;
use crate::utils::error::{PlazaError, Result};
use actix_web::{HttpResponse, web};
use tracing::info;

/// Register manager routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/managers")
            .route("/register", web::post().to(register_manager))
            .route("/{plaza_id}", web::get().to(get_manager_by_plaza))
            .route("/{plaza_id}/exists", web::get().to(manager_exists)),
    );
}

async fn register_manager(
    state: web::Data<AppState>,
    request: web::Json<UserRequest>,
) -> Result<HttpResponse> {
    let db = state.storage.db();
    let request = request.into_inner();

    if db.exists_user_by_username(&request.username).await? {
        return Err(PlazaError::conflict("Username already exists"));
    }
    if db.exists_user_by_email(&request.email).await? {
        return Err(PlazaError::conflict("Email already exists"));
    }
    if let Some(external_id) = request.external_id.as_deref().filter(|id| !id.is_empty()) {
        if db.find_user_by_external_id(external_id).await?.is_some() {
            return Err(PlazaError::conflict("External ID already exists"));
        }
    }

    let plaza_id = request
        .plaza_id
        .ok_or_else(|| PlazaError::validation("Plaza ID is required"))?;
    let plaza = db
        .find_plaza_by_id(plaza_id)
        .await?
        .ok_or_else(|| PlazaError::validation(format!("Plaza not found with id: {}", plaza_id)))?;
    if !plaza.is_active {
        return Err(PlazaError::validation("Plaza is not active"));
    }

    let password = request
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| PlazaError::validation("Password is required"))?;

    let mut manager = User::new(&request.username, &request.email, hash_password(password)?);
    manager.first_name = request.first_name.clone();
    manager.last_name = request.last_name.clone();
    manager.phone_number = request.phone_number.clone();
    manager.external_id = request.external_id.clone().filter(|id| !id.is_empty());
    manager.plaza_id = Some(plaza.id);

    manager.role_ids = match &request.role_ids {
        Some(role_ids) if !role_ids.is_empty() => db
            .find_roles_by_ids(role_ids)
            .await?
            .into_iter()
            .map(|role| role.id)
            .collect(),
        // MANAGER by default when the caller names no roles
        _ => match db.find_role_by_name("MANAGER").await? {
            Some(role) => vec![role.id],
            None => Vec::new(),
        },
    };

    let manager = db.create_user(manager).await?;
    info!(
        "Registered manager {} for plaza {}",
        manager.username, plaza.id
    );

    Ok(HttpResponse::Created().json(to_user_response(db, &manager).await?))
}

async fn get_manager_by_plaza(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let db = state.storage.db();
    let plaza_id = path.into_inner();

    let manager = find_first_manager(&state, plaza_id)
        .await?
        .ok_or_else(|| PlazaError::not_found("No manager found for plaza"))?;

    Ok(HttpResponse::Ok().json(to_user_response(db, &manager).await?))
}

async fn manager_exists(state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse> {
    let manager = find_first_manager(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(manager.is_some()))
}

async fn find_first_manager(state: &AppState, plaza_id: i64) -> Result<Option<User>> {
    let db = state.storage.db();

    let Some(manager_role) = db.find_role_by_name("MANAGER").await? else {
        return Ok(None);
    };

    let managers = db
        .find_users_by_plaza_and_role(plaza_id, manager_role.id)
        .await?;
    Ok(managers.into_iter().next())
}
