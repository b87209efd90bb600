use crate::{AuthError, Claims, Result as AuthErrorResult, TokenCodec};

use kp_core::{TokenKind, TokenPair, TokenStore, User};

use std::panic::Location;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use log::debug;

/// A freshly signed pair plus the row that was written for it.
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub pair: TokenPair,
}

/// Creates access/refresh pairs and writes their expiry metadata through
/// the token store. Writing overwrites whatever pair the user had, which is
/// what makes the previous pair unverifiable (see `TokenValidator`).
pub struct TokenIssuer {
    codec: Arc<TokenCodec>,
    store: Arc<dyn TokenStore>,
    access_ttl_secs: u64,
    refresh_ttl_secs: u64,
}

impl TokenIssuer {
    pub fn new(
        codec: Arc<TokenCodec>,
        store: Arc<dyn TokenStore>,
        access_ttl_secs: u64,
        refresh_ttl_secs: u64,
    ) -> Self {
        Self {
            codec,
            store,
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    /// Issue a new pair for the user, creating or overwriting the stored row.
    pub async fn issue_pair(&self, user: &User) -> AuthErrorResult<IssuedTokens> {
        let issued = self.build(user)?;
        self.store.upsert(&issued.pair).await?;

        debug!(
            "Issued token pair for user {} (access exp {})",
            user.id, issued.pair.access_expires_at
        );

        Ok(issued)
    }

    /// Replace the user's existing pair. Only called with claims that already
    /// passed refresh validation; never creates a row for a user without one.
    pub async fn rotate_pair(
        &self,
        refresh_claims: &Claims,
        user: &User,
    ) -> AuthErrorResult<IssuedTokens> {
        if refresh_claims.kind != TokenKind::Refresh {
            return Err(AuthError::TypeMismatch {
                expected: TokenKind::Refresh,
                actual: refresh_claims.kind,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let issued = self.build(user)?;
        let updated = self.store.update(&issued.pair).await?;

        if !updated {
            // The user's tokens were already invalidated; rejecting here is
            // what keeps a deleted pair from silently resurrecting.
            return Err(AuthError::NoLinkedTokens {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        debug!("Rotated token pair for user {}", user.id);

        Ok(issued)
    }

    /// Sign both tokens and assemble the pair row, all at second precision
    /// so stored expiries compare exactly against embedded ones.
    fn build(&self, user: &User) -> AuthErrorResult<IssuedTokens> {
        let now = Utc::now().timestamp();
        let access_exp = now + self.access_ttl_secs as i64;
        let refresh_exp = now + self.refresh_ttl_secs as i64;

        let access_claims = Claims::new(user, TokenKind::Access, now, access_exp);
        let refresh_claims = Claims::new(user, TokenKind::Refresh, now, refresh_exp);

        let access_token = self.codec.sign(&access_claims)?;
        let refresh_token = self.codec.sign(&refresh_claims)?;

        let pair = TokenPair::new(
            user.id,
            timestamp(access_exp, "access expiry")?,
            timestamp(refresh_exp, "refresh expiry")?,
            timestamp(now, "updated_at")?,
        );

        Ok(IssuedTokens {
            access_token,
            refresh_token,
            pair,
        })
    }
}

#[track_caller]
fn timestamp(secs: i64, what: &str) -> AuthErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| AuthError::InvalidClaim {
        claim: "exp".to_string(),
        message: format!("{} out of timestamp range: {}", what, secs),
        location: ErrorLocation::from(Location::caller()),
    })
}
