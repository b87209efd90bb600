use crate::api::gate::auth_gate;
use crate::api::users::users::{login, logout, me, refresh, register};
use crate::health;
use crate::state::AppState;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints.
///
/// The auth gate wraps every route; which ones pass through unauthenticated
/// is decided by the configured public path list, not by route wiring.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Auth endpoints
        .route("/api/user/register", post(register))
        .route("/api/user/login", post(login))
        .route("/api/user/token/refresh", post(refresh))
        .route("/api/user/logout", post(logout))
        .route("/api/user/me", get(me))
        // Auth gate runs before any handler
        .layer(middleware::from_fn_with_state(state.clone(), auth_gate))
        // Add shared state
        .with_state(state)
        // CORS middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
