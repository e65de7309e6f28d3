//! Route policy table and middleware helpers
//!
//! Authorization is data, not annotations: each route pattern maps to the
//! access it requires, and the token gate evaluates the first matching entry.

use crate::auth::Principal;
use crate::utils::error::{PlazaError, Result};
use actix_web::http::Method;
use actix_web::http::header::HeaderMap;
use actix_web::{HttpMessage, HttpRequest};

/// Access required by a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// No identity required; a valid token still attaches one
    Public,
    /// Any authenticated principal
    Authenticated,
    /// A principal holding at least one of these roles
    AnyRole(&'static [&'static str]),
}

/// A single route policy entry
struct RoutePolicy {
    /// Restrict the entry to one method; `None` matches all methods
    method: Option<Method>,
    /// Path prefix the entry applies to
    prefix: &'static str,
    /// Required access
    access: RouteAccess,
}

const MANAGEMENT: &[&str] = &["MANAGER", "ADMIN"];
const EMPLOYEES: &[&str] = &[
    "MANAGER",
    "EMPLOYEE_GENERAL",
    "EMPLOYEE_SECURITY",
    "EMPLOYEE_PARKING",
];

/// Route policies, first match wins; unmatched routes require authentication
static ROUTE_POLICIES: &[RoutePolicy] = &[
    RoutePolicy {
        method: None,
        prefix: "/health",
        access: RouteAccess::Public,
    },
    RoutePolicy {
        method: None,
        prefix: "/api/auth/",
        access: RouteAccess::Public,
    },
    RoutePolicy {
        method: Some(Method::POST),
        prefix: "/api/managers/register",
        access: RouteAccess::Public,
    },
    // Inter-service manager lookups by plaza
    RoutePolicy {
        method: Some(Method::GET),
        prefix: "/api/managers/",
        access: RouteAccess::Public,
    },
    RoutePolicy {
        method: None,
        prefix: "/api/modules",
        access: RouteAccess::Public,
    },
    RoutePolicy {
        method: None,
        prefix: "/api/users",
        access: RouteAccess::AnyRole(MANAGEMENT),
    },
    RoutePolicy {
        method: None,
        prefix: "/api/roles",
        access: RouteAccess::AnyRole(MANAGEMENT),
    },
    RoutePolicy {
        method: None,
        prefix: "/api/permissions",
        access: RouteAccess::AnyRole(&["MANAGER", "ADMIN", "GERENTE"]),
    },
    RoutePolicy {
        method: Some(Method::GET),
        prefix: "/api/bulletins",
        access: RouteAccess::AnyRole(EMPLOYEES),
    },
    RoutePolicy {
        method: None,
        prefix: "/api/bulletins",
        access: RouteAccess::AnyRole(&["MANAGER"]),
    },
    RoutePolicy {
        method: None,
        prefix: "/api/plazas",
        access: RouteAccess::AnyRole(MANAGEMENT),
    },
    RoutePolicy {
        method: Some(Method::GET),
        prefix: "/api/stores",
        access: RouteAccess::AnyRole(&["MANAGER", "ADMIN", "STORE_OWNER"]),
    },
    RoutePolicy {
        method: None,
        prefix: "/api/stores",
        access: RouteAccess::AnyRole(MANAGEMENT),
    },
    RoutePolicy {
        method: Some(Method::GET),
        prefix: "/api/products",
        access: RouteAccess::AnyRole(EMPLOYEES),
    },
    RoutePolicy {
        method: None,
        prefix: "/api/products",
        access: RouteAccess::AnyRole(&["MANAGER"]),
    },
];

/// Resolve the access required for a (method, path) pair
pub fn route_policy(method: &Method, path: &str) -> RouteAccess {
    for policy in ROUTE_POLICIES {
        if let Some(required_method) = &policy.method {
            if required_method != method {
                continue;
            }
        }
        if path.starts_with(policy.prefix) {
            return policy.access;
        }
    }
    RouteAccess::Authenticated
}

/// Extract a bearer token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get("authorization")?.to_str().ok()?;
    auth_header
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}

/// Principal attached to the current request by the token gate
///
/// Handlers behind a policy requiring identity can rely on this succeeding.
pub fn require_principal(req: &HttpRequest) -> Result<Principal> {
    req.extensions()
        .get::<Principal>()
        .cloned()
        .ok_or_else(|| PlazaError::unauthorized("Authentication required"))
}

/// Principal attached to the current request, if any
pub fn optional_principal(req: &HttpRequest) -> Option<Principal> {
    req.extensions().get::<Principal>().cloned()
}
