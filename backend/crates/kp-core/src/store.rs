use crate::{CoreResult, TokenPair};

use async_trait::async_trait;
use uuid::Uuid;

/// Persistence port for token pair rows.
///
/// Implementations must enforce one row per user and keep each call atomic:
/// concurrent writers for the same user serialize at the storage layer, the
/// row is never left holding expiries from two different pairs.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Current pair for the user, if any.
    async fn find_by_user(&self, user_id: Uuid) -> CoreResult<Option<TokenPair>>;

    /// Insert the user's pair, overwriting an existing row.
    async fn upsert(&self, pair: &TokenPair) -> CoreResult<()>;

    /// Overwrite an existing row only. Returns false when the user has no
    /// stored pair.
    async fn update(&self, pair: &TokenPair) -> CoreResult<bool>;

    /// Remove the user's pair. Returns false when there was none.
    async fn delete_by_user(&self, user_id: Uuid) -> CoreResult<bool>;
}
