//! Token gate
//!
//! Authenticates the bearer token on every request and enforces the route
//! policy table before any handler runs.
//!
//! Policy decision: a token that is *present but invalid or expired* is
//! rejected with 401 on every route, public ones included. Only the absence
//! of a token is tolerated, and then only where the route policy allows it.

use crate::server::middleware::api_key::ExternalCaller;
use crate::server::middleware::helpers::{RouteAccess, extract_bearer_token, route_policy};
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

/// Token gate middleware for Actix-web
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for the token gate
pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
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
            // Machine routes stamped by the external gate bypass user tokens.
            let stamped = req.extensions().get::<ExternalCaller>().is_some();
            if stamped {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            let access = route_policy(req.method(), req.path());

            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                return Ok(deny(
                    req,
                    PlazaError::internal("Application state not configured"),
                ));
            };

            let principal = match extract_bearer_token(req.headers()) {
                Some(token) => match state.auth.jwt().parse_token(&token) {
                    Ok(claims) => {
                        match state.auth.load_principal(&claims.sub).await {
                            Ok(principal) => {
                                debug!(
                                    "Authenticated user {} on path {}",
                                    principal.username,
                                    req.path()
                                );
                                Some(principal)
                            }
                            Err(PlazaError::NotFound(_)) | Err(PlazaError::Unauthorized(_)) => {
                                warn!("Token subject no longer valid: {}", claims.sub);
                                return Ok(deny(
                                    req,
                                    PlazaError::unauthorized("Account is unknown or inactive"),
                                ));
                            }
                            Err(other) => return Ok(deny(req, other)),
                        }
                    }
                    Err(e) => {
                        warn!("Rejecting request with invalid token: {}", e);
                        return Ok(deny(req, PlazaError::Token(e)));
                    }
                },
                None => None,
            };

            match access {
                RouteAccess::Public => {}
                RouteAccess::Authenticated => {
                    if principal.is_none() {
                        return Ok(deny(
                            req,
                            PlazaError::unauthorized("Authentication required"),
                        ));
                    }
                }
                RouteAccess::AnyRole(roles) => match &principal {
                    None => {
                        return Ok(deny(
                            req,
                            PlazaError::unauthorized("Authentication required"),
                        ));
                    }
                    Some(principal) if !principal.has_any_role(roles) => {
                        warn!(
                            "User {} lacks required roles {:?} for {}",
                            principal.username,
                            roles,
                            req.path()
                        );
                        return Ok(deny(
                            req,
                            PlazaError::forbidden("Insufficient role for this resource"),
                        ));
                    }
                    Some(_) => {}
                },
            }

            if let Some(principal) = principal {
                req.extensions_mut().insert(principal);
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Short-circuit the chain with the error's structured response
fn deny<B>(req: ServiceRequest, err: PlazaError) -> ServiceResponse<EitherBody<B>> {
    let res = err.error_response();
    req.into_response(res).map_into_right_body()
}
