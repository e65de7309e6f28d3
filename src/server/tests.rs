//! End-to-end tests for the request gates
//!
//! Each test boots the full app (seeded storage, both middleware gates, all
//! routes) and drives it through `actix_web::test`.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::server::state::AppState;
use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::{Value, json};

const TEST_SECRET: &str = "server-test-secret-that-is-at-least-32-chars";
const EXTERNAL_KEY: &str = "sibling-shared-secret";

fn test_config() -> Config {
    let mut config = Config::default();
    config.gateway.auth.jwt_secret = TEST_SECRET.to_string();
    config.gateway.auth.jwt_expiration = 3600;
    config.gateway.auth.external_api_key = EXTERNAL_KEY.to_string();
    config.gateway.seed.enabled = true;
    config
}

async fn spawn_state() -> AppState {
    let server = HttpServer::new(&test_config()).await.unwrap();
    server.state().clone()
}

macro_rules! spawn_app {
    ($state:expr) => {
        test::init_service(HttpServer::create_app(web::Data::new($state.clone()))).await
    };
}

async fn login<S, B>(app: &S, username: &str, password: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let res = test::call_service(app, req).await;
    let status = res.status();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}

async fn bearer_token<S, B>(app: &S, username: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = login(app, username, "password123").await;
    assert_eq!(status, StatusCode::OK);
    body["accessToken"].as_str().unwrap().to_string()
}

#[actix_web::test]
async fn test_health_is_public() {
    let state = spawn_state().await;
    let app = spawn_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_login_returns_token_with_tenant_claims() {
    let state = spawn_state().await;
    let app = spawn_app!(state);

    let (status, body) = login(&app, "manager1", "password123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["username"], "manager1");
    assert_eq!(body["plazaId"], 1);
    assert_eq!(body["roles"], json!(["MANAGER"]));

    let claims = state
        .auth
        .jwt()
        .parse_token(body["accessToken"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.sub, "manager1");
    assert_eq!(claims.roles, vec!["MANAGER".to_string()]);
    assert_eq!(claims.plaza_id, Some(1));
}

#[actix_web::test]
async fn test_bad_credentials_are_indistinguishable() {
    let state = spawn_state().await;
    let app = spawn_app!(state);

    let (unknown_status, unknown_body) = login(&app, "nobody", "password123").await;
    let (wrong_status, wrong_body) = login(&app, "manager1", "wrong-password").await;

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_body["error"]["code"], wrong_body["error"]["code"]);
    assert_eq!(
        unknown_body["error"]["message"],
        wrong_body["error"]["message"]
    );
}

#[actix_web::test]
async fn test_protected_route_without_token_is_unauthorized() {
    let state = spawn_state().await;
    let app = spawn_app!(state);

    let req = test::TestRequest::get().uri("/api/users").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_invalid_token_rejected_everywhere() {
    let state = spawn_state().await;
    let app = spawn_app!(state);

    // A present-but-invalid token fails even on a public route.
    for uri in ["/health", "/api/users"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", "Bearer not-a-real-token"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "uri: {}", uri);
    }
}

#[actix_web::test]
async fn test_employee_forbidden_on_manager_route() {
    let state = spawn_state().await;
    let app = spawn_app!(state);
    let token = bearer_token(&app, "employee1").await;

    // Reads are open to employees
    let req = test::TestRequest::get()
        .uri("/api/bulletins")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    // Writes are manager-only
    let req = test::TestRequest::post()
        .uri("/api/bulletins")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "title": "x", "content": "y" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Management listing is out of reach entirely
    let req = test::TestRequest::get()
        .uri("/api/users")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_manager_crud_stays_inside_tenant() {
    let state = spawn_state().await;
    let app = spawn_app!(state);

    let token1 = bearer_token(&app, "manager1").await;
    let token2 = bearer_token(&app, "manager2").await;

    // Plaza 1 has four seeded staff accounts; plaza 2 only its manager.
    let req = test::TestRequest::get()
        .uri("/api/users")
        .insert_header(("Authorization", format!("Bearer {}", token1)))
        .to_request();
    let users: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(users.as_array().unwrap().len(), 4);

    let req = test::TestRequest::get()
        .uri("/api/users")
        .insert_header(("Authorization", format!("Bearer {}", token2)))
        .to_request();
    let users: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "manager2");

    // A plaza-1 user id is not reachable through a plaza-2 identity.
    let req = test::TestRequest::get()
        .uri("/api/users/1")
        .insert_header(("Authorization", format!("Bearer {}", token2)))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_external_gate_rejects_bad_key() {
    let state = spawn_state().await;
    let app = spawn_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/users/externo")
        .insert_header(("X-API-KEY", "wrong"))
        .set_json(json!({ "externalId": "U-1", "plazaExternalId": "P-1" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Missing key is rejected the same way.
    let req = test::TestRequest::post()
        .uri("/api/plazas/externo")
        .set_json(json!({ "externalId": "P-1", "name": "Mirrored" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_external_gate_accepts_shared_secret_without_user_token() {
    let state = spawn_state().await;
    let app = spawn_app!(state);

    // Mirror a plaza in, then provision a user against it, no bearer token.
    let req = test::TestRequest::post()
        .uri("/api/plazas/externo")
        .insert_header(("X-API-KEY", EXTERNAL_KEY))
        .set_json(json!({ "externalId": "P-77", "name": "Plaza Mirrored" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/users/externo")
        .insert_header(("X-API-KEY", EXTERNAL_KEY))
        .set_json(json!({
            "externalId": "U-77",
            "nombre": "Ana Torres",
            "email": "ana.torres@example.com",
            "rol": "GERENTE",
            "plazaExternalId": "P-77"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["username"], "ana.torres");
    assert_eq!(body["firstName"], "Ana");

    // Re-sending the same external id returns the existing account.
    let req = test::TestRequest::post()
        .uri("/api/users/externo")
        .insert_header(("X-API-KEY", EXTERNAL_KEY))
        .set_json(json!({
            "externalId": "U-77",
            "email": "ana.torres@example.com",
            "plazaExternalId": "P-77"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_me_reflects_token_identity() {
    let state = spawn_state().await;
    let app = spawn_app!(state);
    let token = bearer_token(&app, "security1").await;

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["username"], "security1");
    assert_eq!(body["plazaId"], 1);
    assert!(body.get("accessToken").is_none());

    // Anonymous /me is rejected by the handler, not the gate.
    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_manager_register_flow() {
    let state = spawn_state().await;
    let app = spawn_app!(state);

    // Username already taken
    let payload = json!({
        "username": "manager1",
        "email": "fresh@plaza.com",
        "password": "password123",
        "plazaId": 1
    });
    let req = test::TestRequest::post()
        .uri("/api/managers/register")
        .set_json(payload)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Unknown plaza
    let payload = json!({
        "username": "manager3",
        "email": "manager3@plaza.com",
        "password": "password123",
        "plazaId": 999
    });
    let req = test::TestRequest::post()
        .uri("/api/managers/register")
        .set_json(payload)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Happy path defaults the role to MANAGER
    let payload = json!({
        "username": "manager3",
        "email": "manager3@plaza.com",
        "password": "password123",
        "plazaId": 2
    });
    let req = test::TestRequest::post()
        .uri("/api/managers/register")
        .set_json(payload)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["roles"][0]["name"], "MANAGER");
}

#[actix_web::test]
async fn test_modules_degrade_to_empty_list() {
    // No sibling service is listening on the configured URL.
    let state = spawn_state().await;
    let app = spawn_app!(state);

    let req = test::TestRequest::get().uri("/api/modules").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!([]));
}
