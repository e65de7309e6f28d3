//! Plaza endpoints
//!
//! Read access for management roles, plus the `externo` machine route the
//! sibling system service uses to mirror its plaza catalog into this gateway.

use crate::core::models::Plaza;
use crate::server::state::AppState;
use crate::utils::error::{PlazaError, Result};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Register plaza routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/plazas")
            .route("", web::get().to(list_plazas))
            .route("/search", web::get().to(search_plazas))
            .route("/externo", web::post().to(upsert_plaza_from_external))
            .route("/{id}", web::get().to(get_plaza)),
    );
}

/// Plaza payload returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlazaResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub opening_hours: Option<String>,
    pub closing_hours: Option<String>,
    pub external_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Plaza> for PlazaResponse {
    fn from(plaza: &Plaza) -> Self {
        Self {
            id: plaza.id,
            name: plaza.name.clone(),
            description: plaza.description.clone(),
            address: plaza.address.clone(),
            phone_number: plaza.phone_number.clone(),
            email: plaza.email.clone(),
            opening_hours: plaza.opening_hours.clone(),
            closing_hours: plaza.closing_hours.clone(),
            external_id: plaza.external_id.clone(),
            is_active: plaza.is_active,
            created_at: plaza.created_at,
            updated_at: plaza.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: String,
}

async fn list_plazas(state: web::Data<AppState>) -> Result<HttpResponse> {
    let plazas = state.storage.db().list_active_plazas().await?;
    let response: Vec<PlazaResponse> = plazas.iter().map(PlazaResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

async fn get_plaza(state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse> {
    let plaza = state
        .storage
        .db()
        .find_active_plaza_by_id(path.into_inner())
        .await?
        .ok_or_else(|| PlazaError::not_found("Plaza not found"))?;

    Ok(HttpResponse::Ok().json(PlazaResponse::from(&plaza)))
}

async fn search_plazas(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    let plazas = state.storage.db().search_plazas_by_name(&query.name).await?;
    let response: Vec<PlazaResponse> = plazas.iter().map(PlazaResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// Payload sent by the sibling system service when mirroring a plaza
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalPlazaRequest {
    pub external_id: String,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub opening_hours: Option<String>,
    pub closing_hours: Option<String>,
}

/// Upsert keyed by the sibling's external id
async fn upsert_plaza_from_external(
    state: web::Data<AppState>,
    request: web::Json<ExternalPlazaRequest>,
) -> Result<HttpResponse> {
    let db = state.storage.db();
    let request = request.into_inner();

    if request.external_id.is_empty() {
        return Err(PlazaError::validation("externalId is required"));
    }

    if let Some(mut existing) = db.find_plaza_by_external_id(&request.external_id).await? {
        existing.name = request.name.clone();
        existing.description = request.description.clone();
        existing.address = request.address.clone();
        existing.phone_number = request.phone_number.clone();
        existing.email = request.email.clone();
        existing.opening_hours = request.opening_hours.clone();
        existing.closing_hours = request.closing_hours.clone();

        let plaza = db.update_plaza(existing).await?;
        info!("Updated plaza {} from external system", plaza.id);
        return Ok(HttpResponse::Ok().json(PlazaResponse::from(&plaza)));
    }

    let mut plaza = Plaza::new(&request.name);
    plaza.description = request.description.clone();
    plaza.address = request.address.clone();
    plaza.phone_number = request.phone_number.clone();
    plaza.email = request.email.clone();
    plaza.opening_hours = request.opening_hours.clone();
    plaza.closing_hours = request.closing_hours.clone();
    plaza.external_id = Some(request.external_id.clone());

    let plaza = db.create_plaza(plaza).await?;
    info!("Created plaza {} from external system", plaza.id);

    Ok(HttpResponse::Created().json(PlazaResponse::from(&plaza)))
}
