//! Request-scoped claim exposure.
//!
//! One `ClaimContext` is built per authenticated request and travels in that
//! request's extensions, so it is dropped on every exit path with the request
//! itself and can never leak into another request on a reused worker.

use crate::api::error::ApiError;
use crate::state::AppState;

use kp_auth::Claims;

use std::future::Future;
use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use serde_json::{Map, Value};

/// Read-only view of the current request's verified claims.
#[derive(Debug, Clone)]
pub struct ClaimContext {
    claims: Arc<Map<String, Value>>,
}

impl ClaimContext {
    pub fn new(claims: &Claims) -> Result<Self, serde_json::Error> {
        let value = serde_json::to_value(claims)?;
        let map = value.as_object().cloned().unwrap_or_default();

        Ok(Self {
            claims: Arc::new(map),
        })
    }

    /// Claim value by key, absent if the token did not carry it
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.claims.get(key)
    }

    /// Subject claim (user id) as a string
    pub fn subject(&self) -> Option<&str> {
        self.get("sub").and_then(Value::as_str)
    }

    /// Unique id of the token this request authenticated with
    pub fn token_id(&self) -> Option<&str> {
        self.get("jti").and_then(Value::as_str)
    }
}

impl FromRequestParts<AppState> for ClaimContext {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            parts
                .extensions
                .get::<ClaimContext>()
                .cloned()
                .ok_or_else(ApiError::unauthorized)
        }
    }
}
