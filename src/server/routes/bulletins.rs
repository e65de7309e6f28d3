//! Bulletin endpoints
//!
//! Daily market bulletins, readable by all employee roles and writable by
//! managers, always within the caller's plaza.

use crate::core::models::Bulletin;
use crate::server::middleware::require_principal;
use crate::server::state::AppState;
use crate::utils::error::{PlazaError, Result};
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Register bulletin routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/bulletins")
            .route("", web::get().to(list_bulletins))
            .route("", web::post().to(create_bulletin))
            .route("/today", web::get().to(todays_bulletins))
            .route("/date/{date}", web::get().to(bulletins_by_date))
            .route("/{id}", web::get().to(get_bulletin))
            .route("/{id}", web::put().to(update_bulletin))
            .route("/{id}", web::delete().to(delete_bulletin)),
    );
}

/// Bulletin payload accepted by create/update endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletinRequest {
    pub title: String,
    pub content: String,
    /// Defaults to today when absent
    pub publication_date: Option<NaiveDate>,
}

/// Bulletin payload returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletinResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub publication_date: NaiveDate,
    pub plaza_id: i64,
    pub created_by: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Bulletin> for BulletinResponse {
    fn from(bulletin: &Bulletin) -> Self {
        Self {
            id: bulletin.id,
            title: bulletin.title.clone(),
            content: bulletin.content.clone(),
            publication_date: bulletin.publication_date,
            plaza_id: bulletin.plaza_id,
            created_by: bulletin.created_by,
            is_active: bulletin.is_active,
            created_at: bulletin.created_at,
            updated_at: bulletin.updated_at,
        }
    }
}

async fn list_bulletins(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;

    let bulletins = state.storage.db().find_bulletins_by_plaza(plaza_id).await?;
    let response: Vec<BulletinResponse> = bulletins.iter().map(BulletinResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

async fn todays_bulletins(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;

    let today = Utc::now().date_naive();
    let bulletins = state
        .storage
        .db()
        .find_bulletins_by_plaza_and_date(plaza_id, today)
        .await?;
    let response: Vec<BulletinResponse> = bulletins.iter().map(BulletinResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

async fn bulletins_by_date(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;

    let date: NaiveDate = path
        .into_inner()
        .parse()
        .map_err(|_| PlazaError::validation("Invalid date, expected YYYY-MM-DD"))?;

    let bulletins = state
        .storage
        .db()
        .find_bulletins_by_plaza_and_date(plaza_id, date)
        .await?;
    let response: Vec<BulletinResponse> = bulletins.iter().map(BulletinResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

async fn get_bulletin(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;

    let bulletin = state
        .storage
        .db()
        .find_bulletin_by_id_and_plaza(path.into_inner(), plaza_id)
        .await?
        .ok_or_else(|| PlazaError::not_found("Bulletin not found"))?;

    Ok(HttpResponse::Ok().json(BulletinResponse::from(&bulletin)))
}

async fn create_bulletin(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<BulletinRequest>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;
    let db = state.storage.db();
    let request = request.into_inner();

    if !db.exists_active_plaza(plaza_id).await? {
        return Err(PlazaError::validation("Plaza is not active"));
    }

    let publication_date = request
        .publication_date
        .unwrap_or_else(|| Utc::now().date_naive());

    let bulletin = db
        .create_bulletin(Bulletin::new(
            &request.title,
            &request.content,
            publication_date,
            plaza_id,
            principal.user_id,
        ))
        .await?;

    Ok(HttpResponse::Created().json(BulletinResponse::from(&bulletin)))
}

async fn update_bulletin(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<BulletinRequest>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;
    let db = state.storage.db();
    let request = request.into_inner();

    let mut bulletin = db
        .find_bulletin_by_id_and_plaza(path.into_inner(), plaza_id)
        .await?
        .ok_or_else(|| PlazaError::not_found("Bulletin not found"))?;

    bulletin.title = request.title.clone();
    bulletin.content = request.content.clone();
    if let Some(publication_date) = request.publication_date {
        bulletin.publication_date = publication_date;
    }

    let bulletin = db.update_bulletin(bulletin).await?;
    Ok(HttpResponse::Ok().json(BulletinResponse::from(&bulletin)))
}

async fn delete_bulletin(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let principal = require_principal(&req)?;
    let plaza_id = principal.require_plaza()?;
    let db = state.storage.db();

    let mut bulletin = db
        .find_bulletin_by_id_and_plaza(path.into_inner(), plaza_id)
        .await?
        .ok_or_else(|| PlazaError::not_found("Bulletin not found"))?;

    bulletin.is_active = false;
    db.update_bulletin(bulletin).await?;

    Ok(HttpResponse::NoContent().finish())
}
