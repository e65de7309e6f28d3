//! HTTP middleware implementations
//!
//! Two gates run in front of every handler:
//! - the external shared-secret gate for machine-to-machine routes
//! - the token gate, which authenticates the bearer token and enforces the
//!   typed route policy table
//!
//! The external gate runs first so a missing user token on a stamped machine
//! route is not an error.

mod api_key;
mod auth;
mod helpers;

#[cfg(test)]
mod tests;

pub use api_key::{ExternalApiKeyMiddleware, ExternalCaller};
pub use auth::AuthMiddleware;
pub use helpers::{
    RouteAccess, extract_bearer_token, optional_principal, require_principal, route_policy,
};
