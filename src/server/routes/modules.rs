//! Module catalog endpoints
//!
//! Proxies the sibling system-owner service. Identity is optional: an
//! authenticated caller gets the modules of their plaza, an anonymous one the
//! full catalog. Proxy failures degrade to an empty list so the frontend
//! never breaks on a dead sibling.

use crate::server::middleware::optional_principal;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{info, warn};

/// Register module routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/modules")
            .route("", web::get().to(get_modules))
            .route("/plaza/{external_id}", web::get().to(get_modules_by_plaza)),
    );
}

async fn get_modules(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let db = state.storage.db();

    // The plaza's external id drives the lookup, when the caller has one.
    let external_id = match optional_principal(&req) {
        Some(principal) => match principal.plaza_id {
            Some(plaza_id) => db
                .find_plaza_by_id(plaza_id)
                .await?
                .and_then(|plaza| plaza.external_id),
            None => None,
        },
        None => {
            info!("No authentication, getting all modules");
            None
        }
    };

    let modules = match state
        .modules
        .get_plaza_modules(external_id.as_deref())
        .await
    {
        Ok(modules) => modules,
        Err(e) => {
            warn!("Module lookup failed, returning empty list: {}", e);
            Vec::new()
        }
    };

    Ok(HttpResponse::Ok().json(modules))
}

async fn get_modules_by_plaza(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let external_id = path.into_inner();

    let modules = match state.modules.get_plaza_modules(Some(&external_id)).await {
        Ok(modules) => modules,
        Err(e) => {
            warn!(
                "Module lookup failed for plaza {}, returning empty list: {}",
                external_id, e
            );
            Vec::new()
        }
    };

    Ok(HttpResponse::Ok().json(modules))
}
