use crate::TokenKind;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single stored token pair for one user.
///
/// Only the expiry metadata is persisted, never the signed tokens. The
/// stored expiries are the revocation source of truth: a presented token
/// whose embedded expiry no longer equals the stored one is dead, whatever
/// its own clock says.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub user_id: Uuid,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TokenPair {
    pub fn new(
        user_id: Uuid,
        access_expires_at: DateTime<Utc>,
        refresh_expires_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            access_expires_at,
            refresh_expires_at,
            updated_at,
        }
    }

    /// Stored expiry for the given slot.
    pub fn expires_at(&self, kind: TokenKind) -> DateTime<Utc> {
        match kind {
            TokenKind::Access => self.access_expires_at,
            TokenKind::Refresh => self.refresh_expires_at,
        }
    }
}
