//! Per-request auth gate.
//!
//! Runs before every handler: allow-listed paths pass through untouched,
//! everything else must present a valid bearer access token. On success the
//! verified identity is published into the request's extensions; on failure
//! the request short-circuits with 401 before any handler logic runs.

use crate::api::claim_context::ClaimContext;
use crate::api::error::{ApiError, Result as ApiResult};
use crate::state::AppState;

use kp_auth::{AuthError, Claims};
use kp_core::{Principal, TokenKind};

use std::panic::Location;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use error_location::ErrorLocation;
use log::debug;

pub async fn auth_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let path = request.uri().path();

    if is_public(&state.public_paths, path) {
        debug!("Public path, skipping auth: {}", path);
        return Ok(next.run(request).await);
    }

    let token = bearer_token(request.headers())?;
    let claims = state.validator.validate(&token, TokenKind::Access).await?;

    let principal = principal_from(&claims)?;
    let context = ClaimContext::new(&claims)
        .map_err(|e| ApiError::internal(format!("Failed to build claim context: {}", e)))?;

    request.extensions_mut().insert(principal);
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

/// Exact match, or prefix match at a path-segment boundary
fn is_public(public_paths: &[String], path: &str) -> bool {
    public_paths
        .iter()
        .any(|p| path == p || (path.starts_with(p) && path.as_bytes().get(p.len()) == Some(&b'/')))
}

/// Recover the bearer token from the authorization header
#[track_caller]
fn bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingHeader {
            location: ErrorLocation::from(Location::caller()),
        })?;

    header
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or(AuthError::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        })
}

#[track_caller]
fn principal_from(claims: &Claims) -> Result<Principal, AuthError> {
    Ok(Principal::new(
        claims.subject()?,
        &claims.email,
        claims.roles.clone(),
    ))
}
