//! Auth endpoint handlers.
//!
//! Issued tokens travel in response headers, not the body: the access token
//! in `Authorization` (Bearer) and the refresh token in `X-Refresh-Token`.
//! Clients must read both after login and after refresh.

use crate::api::claim_context::ClaimContext;
use crate::api::error::{ApiError, Result as ApiResult};
use crate::api::extractors::current_user::CurrentUser;
use crate::api::users::REFRESH_TOKEN_HEADER;
use crate::api::users::login_request::LoginRequest;
use crate::api::users::me_response::MeResponse;
use crate::api::users::signup_request::SignUpRequest;
use crate::state::AppState;

use kp_auth::IssuedTokens;
use kp_core::{TokenKind, User};

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use log::info;

/// POST /api/user/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> ApiResult<StatusCode> {
    request.validate()?;

    if state.users.find_by_email(&request.email).await?.is_some() {
        return Err(ApiError::validation(
            "Email is already registered",
            Some("email"),
        ));
    }

    let password_hash = kp_auth::hash_password(&request.password)?;
    let user = User::new(&request.email, &password_hash);
    state.users.create(&user).await?;

    info!("Registered user {}", user.id);

    Ok(StatusCode::CREATED)
}

/// POST /api/user/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Response> {
    let user = state
        .users
        .find_by_email(&request.email)
        .await?
        .ok_or_else(ApiError::unauthorized)?;

    if !kp_auth::verify_password(&request.password, &user.password_hash)? {
        return Err(ApiError::unauthorized());
    }

    let issued = state.issuer.issue_pair(&user).await?;

    info!("User {} logged in", user.id);

    token_response(StatusCode::OK, &issued)
}

/// POST /api/user/token/refresh
///
/// Public path: authentication happens here against the presented refresh
/// token, not in the gate.
pub async fn refresh(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    let token = headers
        .get(REFRESH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(ApiError::unauthorized)?;

    let claims = state.validator.validate(token, TokenKind::Refresh).await?;

    let user_id = claims.subject()?;
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let issued = state.issuer.rotate_pair(&claims, &user).await?;

    info!("Rotated token pair for user {}", user.id);

    token_response(StatusCode::OK, &issued)
}

/// POST /api/user/logout
///
/// Drops the stored pair, which makes every outstanding token for this user
/// stale at the next validation.
pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
) -> ApiResult<StatusCode> {
    state.tokens.delete_by_user(principal.user_id).await?;

    info!("User {} logged out", principal.user_id);

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/user/me
pub async fn me(
    CurrentUser(principal): CurrentUser,
    context: ClaimContext,
) -> ApiResult<Json<MeResponse>> {
    Ok(Json(MeResponse {
        user_id: principal.user_id,
        email: principal.email,
        roles: principal.roles,
        token_id: context.token_id().map(str::to_string),
    }))
}

fn token_response(status: StatusCode, issued: &IssuedTokens) -> ApiResult<Response> {
    let access = HeaderValue::from_str(&format!("Bearer {}", issued.access_token))
        .map_err(|e| ApiError::internal(format!("Access token is not header-safe: {}", e)))?;
    let refresh = HeaderValue::from_str(&issued.refresh_token)
        .map_err(|e| ApiError::internal(format!("Refresh token is not header-safe: {}", e)))?;

    let mut response = status.into_response();
    response.headers_mut().insert(AUTHORIZATION, access);
    response
        .headers_mut()
        .insert(HeaderName::from_static(REFRESH_TOKEN_HEADER), refresh);

    Ok(response)
}
