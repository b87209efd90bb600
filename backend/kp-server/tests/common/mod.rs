#![allow(dead_code)]

//! Test infrastructure for kp-server API tests

use kp_server::{AppState, build_router};

use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header::AUTHORIZATION};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

pub const REFRESH_HEADER: &str = "x-refresh-token";

pub fn test_auth_config() -> kp_config::AuthConfig {
    kp_config::AuthConfig {
        secret: String::from("integration-test-secret-32-bytes!"),
        ..Default::default()
    }
}

/// Create AppState backed by a migrated in-memory database
pub async fn create_test_state() -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Failed to create test database");

    kp_db::migrate(&pool).await.expect("Failed to run migrations");

    AppState::new(pool, &test_auth_config())
}

/// Drive one request through a fresh router over the shared state
pub async fn send(state: &AppState, request: Request<Body>) -> Response<Body> {
    build_router(state.clone())
        .oneshot(request)
        .await
        .expect("Request failed")
}

pub async fn post_json(
    state: &AppState,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(state, request).await
}

pub async fn register(state: &AppState, email: &str, password: &str) {
    let response = post_json(
        state,
        "/api/user/register",
        serde_json::json!({ "email": email, "password": password }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Log in and return (authorization header value, refresh token)
pub async fn login(state: &AppState, email: &str, password: &str) -> (String, String) {
    let response = post_json(
        state,
        "/api/user/login",
        serde_json::json!({ "email": email, "password": password }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    (
        header_string(&response, AUTHORIZATION.as_str()),
        header_string(&response, REFRESH_HEADER),
    )
}

pub fn header_string(response: &Response<Body>, name: &str) -> String {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("Missing header {}", name))
        .to_str()
        .expect("Header is not valid UTF-8")
        .to_string()
}

pub async fn get_me(state: &AppState, auth_header: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri("/api/user/me")
        .header(AUTHORIZATION, auth_header)
        .body(Body::empty())
        .unwrap();

    send(state, request).await
}

pub async fn refresh_with(state: &AppState, refresh_token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri("/api/user/token/refresh")
        .header(REFRESH_HEADER, refresh_token)
        .body(Body::empty())
        .unwrap();

    send(state, request).await
}

pub async fn count_token_rows(state: &AppState) -> i64 {
    use sqlx::Row;

    sqlx::query("SELECT COUNT(*) AS n FROM auth_tokens")
        .fetch_one(&state.pool)
        .await
        .expect("Failed to count rows")
        .get("n")
}

/// Wait for the wall clock to tick into the next second, so a rotation
/// produces visibly different expiries.
pub async fn next_second() {
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
}
