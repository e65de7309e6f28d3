//! Tests for the route policy table and helpers

use super::helpers::{RouteAccess, extract_bearer_token, route_policy};
use actix_web::http::Method;
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};

fn headers_with_auth(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(value).unwrap(),
    );
    headers
}

#[test]
fn test_public_routes() {
    assert_eq!(route_policy(&Method::GET, "/health"), RouteAccess::Public);
    assert_eq!(
        route_policy(&Method::POST, "/api/auth/login"),
        RouteAccess::Public
    );
    assert_eq!(
        route_policy(&Method::POST, "/api/managers/register"),
        RouteAccess::Public
    );
    assert_eq!(
        route_policy(&Method::GET, "/api/managers/1/exists"),
        RouteAccess::Public
    );
    assert_eq!(
        route_policy(&Method::GET, "/api/modules"),
        RouteAccess::Public
    );
}

#[test]
fn test_management_routes() {
    for path in ["/api/users", "/api/users/5", "/api/roles", "/api/plazas/search"] {
        match route_policy(&Method::GET, path) {
            RouteAccess::AnyRole(roles) => {
                assert!(roles.contains(&"MANAGER"), "MANAGER missing for {}", path);
                assert!(roles.contains(&"ADMIN"), "ADMIN missing for {}", path);
            }
            other => panic!("expected AnyRole for {}, got {:?}", path, other),
        }
    }
}

#[test]
fn test_bulletin_read_vs_write_split() {
    match route_policy(&Method::GET, "/api/bulletins/today") {
        RouteAccess::AnyRole(roles) => {
            assert!(roles.contains(&"EMPLOYEE_GENERAL"));
            assert!(roles.contains(&"EMPLOYEE_SECURITY"));
        }
        other => panic!("unexpected access: {:?}", other),
    }

    match route_policy(&Method::POST, "/api/bulletins") {
        RouteAccess::AnyRole(roles) => {
            assert_eq!(roles, &["MANAGER"]);
        }
        other => panic!("unexpected access: {:?}", other),
    }
}

#[test]
fn test_store_read_includes_store_owner() {
    match route_policy(&Method::GET, "/api/stores") {
        RouteAccess::AnyRole(roles) => assert!(roles.contains(&"STORE_OWNER")),
        other => panic!("unexpected access: {:?}", other),
    }

    match route_policy(&Method::DELETE, "/api/stores/3") {
        RouteAccess::AnyRole(roles) => assert!(!roles.contains(&"STORE_OWNER")),
        other => panic!("unexpected access: {:?}", other),
    }
}

#[test]
fn test_unmatched_routes_require_authentication() {
    assert_eq!(
        route_policy(&Method::GET, "/api/unknown"),
        RouteAccess::Authenticated
    );
    // Manager writes are not covered by the public GET entry
    assert_eq!(
        route_policy(&Method::DELETE, "/api/managers/1"),
        RouteAccess::Authenticated
    );
}

#[test]
fn test_extract_bearer_token() {
    let headers = headers_with_auth("Bearer abc.def.ghi");
    assert_eq!(extract_bearer_token(&headers).as_deref(), Some("abc.def.ghi"));
}

#[test]
fn test_extract_bearer_token_rejects_other_schemes() {
    let headers = headers_with_auth("Basic dXNlcjpwYXNz");
    assert_eq!(extract_bearer_token(&headers), None);

    assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
}
