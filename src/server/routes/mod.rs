//! HTTP route modules
//!
//! Route handlers organized by resource. Wire payloads use camelCase field
//! names; tenant-scoped handlers derive the plaza filter from the attached
//! principal, never from client input.

pub mod auth;
pub mod bulletins;
pub mod managers;
pub mod modules;
pub mod permissions;
pub mod plazas;
pub mod products;
pub mod roles;
pub mod stores;
pub mod users;

use crate::core::models::{RoleRecord, User};
use crate::storage::database::Database;
use crate::utils::error::Result;
use actix_web::web;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Register all API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    auth::configure(cfg);
    users::configure(cfg);
    managers::configure(cfg);
    plazas::configure(cfg);
    stores::configure(cfg);
    bulletins::configure(cfg);
    products::configure(cfg);
    roles::configure(cfg);
    permissions::configure(cfg);
    modules::configure(cfg);
}

/// User payload accepted by create/update/register endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub username: String,
    pub email: String,
    /// Plaintext password; optional on update, required on create
    pub password: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub phone_number: Option<String>,
    pub plaza_id: Option<i64>,
    pub role_ids: Option<Vec<i64>>,
    pub external_id: Option<String>,
}

/// User payload returned by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub plaza_id: Option<i64>,
    pub plaza_name: Option<String>,
    pub external_id: Option<String>,
    pub roles: Vec<RoleResponse>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role payload returned by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&RoleRecord> for RoleResponse {
    fn from(role: &RoleRecord) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
            description: role.description.clone(),
            is_active: role.is_active,
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}

/// Build the API representation of a user, resolving plaza and roles
pub(crate) async fn to_user_response(db: &Database, user: &User) -> Result<UserResponse> {
    let plaza = match user.plaza_id {
        Some(plaza_id) => db.find_plaza_by_id(plaza_id).await?,
        None => None,
    };
    let roles = db.find_roles_by_ids(&user.role_ids).await?;

    Ok(UserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        full_name: user.full_name(),
        phone_number: user.phone_number.clone(),
        plaza_id: user.plaza_id,
        plaza_name: plaza.as_ref().map(|p| p.name.clone()),
        external_id: user.external_id.clone(),
        roles: roles.iter().map(RoleResponse::from).collect(),
        is_active: user.is_active,
        created_at: user.created_at,
        updated_at: user.updated_at,
    })
}
