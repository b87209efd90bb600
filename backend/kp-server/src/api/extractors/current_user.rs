//! Axum extractors for REST API authentication

use crate::api::error::ApiError;
use crate::state::AppState;

use kp_core::Principal;

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Extracts the authenticated principal published by the auth gate.
///
/// Only resolves on routes behind the gate; elsewhere it rejects with 401
/// rather than fabricating an identity.
pub struct CurrentUser(pub Principal);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            parts
                .extensions
                .get::<Principal>()
                .cloned()
                .map(CurrentUser)
                .ok_or_else(ApiError::unauthorized)
        }
    }
}
