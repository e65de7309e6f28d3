//! Authentication endpoints
//!
//! Login, the external registration used by the sibling system service, and
//! the current-user lookup. Logout is informational: tokens are stateless and
//! remain valid until expiry.

use crate::core::models::{RoleRecord, User};
use crate::server::middleware::require_principal;
use crate::server::state::AppState;
use crate::utils::crypto::hash_password;
use crate::utils::error::{PlazaError, Result};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

/// Register authentication routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/login", web::post().to(login))
            .route("/external-register", web::post().to(external_register))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response payload
///
/// Also returned (without the token) by `GET /api/auth/me`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub token_type: String,
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub plaza_id: Option<i64>,
    pub plaza_name: Option<String>,
    /// The plaza's identifier in the sibling system
    pub external_id: Option<String>,
    pub roles: Vec<String>,
}

async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let (principal, token) = state
        .auth
        .login(&request.username, &request.password)
        .await?;

    let response = login_response(&state, &principal.username, Some(token)).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// External user registration payload: the `plazaId` field carries the
/// plaza's *external* id, not the internal database id.
async fn external_register(
    state: web::Data<AppState>,
    request: web::Json<super::UserRequest>,
) -> Result<HttpResponse> {
    let db = state.storage.db();
    let request = request.into_inner();

    if db.exists_user_by_username(&request.username).await? {
        return Err(PlazaError::conflict("Username already exists"));
    }
    if db.exists_user_by_email(&request.email).await? {
        return Err(PlazaError::conflict("Email already exists"));
    }

    let plaza_external_id = request
        .plaza_id
        .ok_or_else(|| PlazaError::validation("Plaza external ID is required"))?
        .to_string();

    let plaza = db
        .find_plaza_by_external_id(&plaza_external_id)
        .await?
        .ok_or_else(|| {
            PlazaError::validation("Plaza not found with the provided external ID")
        })?;
    if !plaza.is_active {
        return Err(PlazaError::validation("Plaza is inactive"));
    }

    let password = request
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| PlazaError::validation("Password is required"))?;

    let mut user = User::new(
        &request.username,
        &request.email,
        hash_password(password)?,
    );
    user.first_name = request.first_name.clone();
    user.last_name = request.last_name.clone();
    user.phone_number = request.phone_number.clone();
    user.plaza_id = Some(plaza.id);
    user.role_ids = vec![gerente_role(&state).await?.id];

    let user = db.create_user(user).await?;
    info!("Externally registered user: {}", user.username);

    // Auto-login the newly registered user
    let (_, token) = state.auth.login(&user.username, password).await?;
    let response = login_response(&state, &user.username, Some(token)).await?;

    Ok(HttpResponse::Created().json(response))
}

async fn logout() -> Result<HttpResponse> {
    // Stateless tokens: nothing to revoke server-side.
    Ok(HttpResponse::Ok().json(json!({ "message": "Successfully logged out" })))
}

async fn me(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let response = login_response(&state, &principal.username, None).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// The full-access role granted to externally registered managers, created
/// on first use when the seed catalog did not provide it
async fn gerente_role(state: &AppState) -> Result<RoleRecord> {
    let db = state.storage.db();

    if let Some(role) = db.find_role_by_name("GERENTE").await? {
        return Ok(role);
    }

    let mut role = RoleRecord::new("GERENTE", "Plaza manager with full access");
    role.permission_ids = db
        .list_active_permissions()
        .await?
        .iter()
        .map(|permission| permission.id)
        .collect();
    db.create_role(role).await
}

/// Assemble the login payload for a user
async fn login_response(
    state: &AppState,
    username: &str,
    access_token: Option<String>,
) -> Result<LoginResponse> {
    let db = state.storage.db();

    let user = db
        .find_user_by_username(username)
        .await?
        .ok_or_else(|| PlazaError::not_found(format!("User not found: {}", username)))?;

    let plaza = match user.plaza_id {
        Some(plaza_id) => db.find_plaza_by_id(plaza_id).await?,
        None => None,
    };
    let roles = db.find_roles_by_ids(&user.role_ids).await?;

    Ok(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        full_name: user.full_name(),
        plaza_id: user.plaza_id,
        plaza_name: plaza.as_ref().map(|p| p.name.clone()),
        external_id: plaza.as_ref().and_then(|p| p.external_id.clone()),
        roles: roles.into_iter().map(|role| role.name).collect(),
    })
}
