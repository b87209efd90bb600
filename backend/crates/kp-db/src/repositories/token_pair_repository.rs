//! Token pair repository.
//!
//! The auth_tokens row is the revocation source of truth (see
//! `kp_auth::TokenValidator`), so every write here must replace the whole
//! row at once. Upsert and update are single statements; SQLite's writer
//! lock serializes concurrent rotations for the same user and the row can
//! never hold expiries from two different pairs.

use crate::{DbError, Result as DbErrorResult};

use kp_core::{CoreError, CoreResult, TokenPair, TokenStore};

use async_trait::async_trait;
use chrono::DateTime;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use uuid::Uuid;

#[derive(Clone)]
pub struct TokenPairRepository {
    pool: SqlitePool,
}

impl TokenPairRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> DbErrorResult<Option<TokenPair>> {
        let row = sqlx::query(
            r#"
                SELECT user_id, access_expires_at, refresh_expires_at, updated_at
                FROM auth_tokens
                WHERE user_id = ?
            "#,
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(map_token_pair).transpose()
    }

    /// Insert the user's pair, overwriting an existing row in place.
    pub async fn upsert(&self, pair: &TokenPair) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO auth_tokens (user_id, access_expires_at, refresh_expires_at, updated_at)
                VALUES (?, ?, ?, ?)
                ON CONFLICT(user_id) DO UPDATE SET
                    access_expires_at = excluded.access_expires_at,
                    refresh_expires_at = excluded.refresh_expires_at,
                    updated_at = excluded.updated_at
            "#,
        )
        .bind(pair.user_id.to_string())
        .bind(pair.access_expires_at.timestamp())
        .bind(pair.refresh_expires_at.timestamp())
        .bind(pair.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrite an existing row only. Returns false when the user has no
    /// stored pair.
    pub async fn update(&self, pair: &TokenPair) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE auth_tokens
                SET access_expires_at = ?, refresh_expires_at = ?, updated_at = ?
                WHERE user_id = ?
            "#,
        )
        .bind(pair.access_expires_at.timestamp())
        .bind(pair.refresh_expires_at.timestamp())
        .bind(pair.updated_at.timestamp())
        .bind(pair.user_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_by_user(&self, user_id: Uuid) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TokenStore for TokenPairRepository {
    async fn find_by_user(&self, user_id: Uuid) -> CoreResult<Option<TokenPair>> {
        TokenPairRepository::find_by_user(self, user_id)
            .await
            .map_err(into_store_error)
    }

    async fn upsert(&self, pair: &TokenPair) -> CoreResult<()> {
        TokenPairRepository::upsert(self, pair)
            .await
            .map_err(into_store_error)
    }

    async fn update(&self, pair: &TokenPair) -> CoreResult<bool> {
        TokenPairRepository::update(self, pair)
            .await
            .map_err(into_store_error)
    }

    async fn delete_by_user(&self, user_id: Uuid) -> CoreResult<bool> {
        TokenPairRepository::delete_by_user(self, user_id)
            .await
            .map_err(into_store_error)
    }
}

#[track_caller]
fn into_store_error(e: DbError) -> CoreError {
    CoreError::store(e.to_string())
}

fn map_token_pair(row: SqliteRow) -> DbErrorResult<TokenPair> {
    let user_id: String = row.try_get("user_id")?;
    let access_expires_at: i64 = row.try_get("access_expires_at")?;
    let refresh_expires_at: i64 = row.try_get("refresh_expires_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(TokenPair {
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| DbError::decode(format!("Invalid UUID in auth_tokens.user_id: {}", e)))?,
        access_expires_at: DateTime::from_timestamp(access_expires_at, 0)
            .ok_or_else(|| DbError::decode("Invalid timestamp in auth_tokens.access_expires_at"))?,
        refresh_expires_at: DateTime::from_timestamp(refresh_expires_at, 0)
            .ok_or_else(|| DbError::decode("Invalid timestamp in auth_tokens.refresh_expires_at"))?,
        updated_at: DateTime::from_timestamp(updated_at, 0)
            .ok_or_else(|| DbError::decode("Invalid timestamp in auth_tokens.updated_at"))?,
    })
}
