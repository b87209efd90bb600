use crate::{AuthError, Claims, Result as AuthErrorResult, TokenCodec};

use kp_core::{TokenKind, TokenStore};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::debug;

/// Verifies presented tokens against both the signature and the stored pair.
///
/// The stored-expiry equality check is the revocation mechanism: rotation and
/// re-issuance overwrite the stored expiries, so any previously issued token
/// stops matching immediately, whatever its own embedded expiry says. Never
/// mutates state; safe to call concurrently.
pub struct TokenValidator {
    codec: Arc<TokenCodec>,
    store: Arc<dyn TokenStore>,
}

impl TokenValidator {
    pub fn new(codec: Arc<TokenCodec>, store: Arc<dyn TokenStore>) -> Self {
        Self { codec, store }
    }

    pub async fn validate(
        &self,
        token: &str,
        expected: TokenKind,
    ) -> AuthErrorResult<Claims> {
        let claims = self.codec.decode(token)?;

        if claims.kind != expected {
            return Err(AuthError::TypeMismatch {
                expected,
                actual: claims.kind,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let user_id = claims.subject()?;

        // A missing row reads as revoked: the pair was deleted or was never
        // issued, and either way nothing presented against it is current.
        let Some(pair) = self.store.find_by_user(user_id).await? else {
            debug!("No stored pair for user {} ({})", user_id, expected);
            return Err(AuthError::StaleToken {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        if claims.exp != pair.expires_at(expected).timestamp() {
            debug!(
                "Stale {} token for user {}: embedded exp {} != stored {}",
                expected,
                user_id,
                claims.exp,
                pair.expires_at(expected).timestamp()
            );
            return Err(AuthError::StaleToken {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(claims)
    }
}
