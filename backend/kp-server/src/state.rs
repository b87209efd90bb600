use kp_auth::{TokenCodec, TokenIssuer, TokenValidator};
use kp_core::TokenStore;
use kp_db::{TokenPairRepository, UserRepository};

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared application state, cloned per request by axum.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub users: UserRepository,
    pub tokens: TokenPairRepository,
    pub issuer: Arc<TokenIssuer>,
    pub validator: Arc<TokenValidator>,
    pub public_paths: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(pool: SqlitePool, auth: &kp_config::AuthConfig) -> Self {
        let codec = Arc::new(TokenCodec::with_hs256(auth.secret.as_bytes()));
        let tokens = TokenPairRepository::new(pool.clone());
        let store: Arc<dyn TokenStore> = Arc::new(tokens.clone());

        Self {
            users: UserRepository::new(pool.clone()),
            issuer: Arc::new(TokenIssuer::new(
                codec.clone(),
                store.clone(),
                auth.access_ttl_secs,
                auth.refresh_ttl_secs,
            )),
            validator: Arc::new(TokenValidator::new(codec, store)),
            public_paths: Arc::new(auth.public_paths.clone()),
            tokens,
            pool,
        }
    }
}
