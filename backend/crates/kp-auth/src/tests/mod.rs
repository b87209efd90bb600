
use crate::TokenCodec;

use kp_core::{CoreResult, TokenPair, TokenStore, User};

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

pub(crate) fn test_codec() -> TokenCodec {
    TokenCodec::with_hs256(TEST_SECRET)
}

pub(crate) fn test_user() -> User {
    User::new("user@test.local", "phc-hash-placeholder")
}

/// HashMap-backed token store: one entry per user by construction, same
/// overwrite semantics as the SQLite repository.
#[derive(Default)]
pub(crate) struct InMemoryTokenStore {
    rows: Mutex<HashMap<Uuid, TokenPair>>,
}

impl InMemoryTokenStore {
    pub(crate) async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn find_by_user(&self, user_id: Uuid) -> CoreResult<Option<TokenPair>> {
        Ok(self.rows.lock().await.get(&user_id).cloned())
    }

    async fn upsert(&self, pair: &TokenPair) -> CoreResult<()> {
        self.rows.lock().await.insert(pair.user_id, pair.clone());
        Ok(())
    }

    async fn update(&self, pair: &TokenPair) -> CoreResult<bool> {
        let mut rows = self.rows.lock().await;
        if !rows.contains_key(&pair.user_id) {
            return Ok(false);
        }
        rows.insert(pair.user_id, pair.clone());
        Ok(true)
    }

    async fn delete_by_user(&self, user_id: Uuid) -> CoreResult<bool> {
        Ok(self.rows.lock().await.remove(&user_id).is_some())
    }
}
