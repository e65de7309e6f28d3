//! External shared-secret gate
//!
//! A small set of machine-to-machine routes is called by sibling services
//! with a static API key instead of a user token. This gate runs before the
//! token gate: on a key match it stamps the request so the token gate skips
//! it entirely; on mismatch or absence the request ends here with 401.

use crate::server::state::AppState;
use crate::utils::error::PlazaError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, ResponseError, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::{debug, warn};

/// Routes protected by the shared secret instead of a user token
const EXTERNAL_PATHS: &[&str] = &["/api/users/externo", "/api/plazas/externo"];

/// Marker stamped onto requests authenticated by the shared secret
#[derive(Debug, Clone, Copy)]
pub struct ExternalCaller;

/// External shared-secret gate middleware for Actix-web
pub struct ExternalApiKeyMiddleware;

impl<S, B> Transform<S, ServiceRequest> for ExternalApiKeyMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = ExternalApiKeyMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ExternalApiKeyMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for the external gate
pub struct ExternalApiKeyMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ExternalApiKeyMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let protected = EXTERNAL_PATHS.iter().any(|path| req.path() == *path);
            if !protected {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                return Ok(deny(
                    req,
                    PlazaError::internal("Application state not configured"),
                ));
            };
            let auth_config = &state.config.gateway.auth;

            let authorized = req
                .headers()
                .get(auth_config.api_key_header.as_str())
                .and_then(|value| value.to_str().ok())
                .is_some_and(|key| !key.is_empty() && key == auth_config.external_api_key);

            if authorized {
                debug!("External caller accepted on {}", req.path());
                req.extensions_mut().insert(ExternalCaller);
                let res = service.call(req).await?;
                Ok(res.map_into_left_body())
            } else {
                warn!(
                    "Rejected external call to {}: bad or missing API key",
                    req.path()
                );
                Ok(deny(
                    req,
                    PlazaError::unauthorized("Invalid or missing API key"),
                ))
            }
        })
    }
}

/// Short-circuit the chain with the error's structured response
fn deny<B>(req: ServiceRequest, err: PlazaError) -> ServiceResponse<EitherBody<B>> {
    let res = err.error_response();
    req.into_response(res).map_into_right_body()
}
