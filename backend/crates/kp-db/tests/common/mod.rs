#![allow(dead_code)]

//! Test infrastructure for kp-db repository tests

use kp_core::{TokenPair, User};

use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use uuid::Uuid;

/// Create a test pool with in-memory SQLite.
///
/// One connection only: each in-memory connection is its own database.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Failed to create test database");

    kp_db::migrate(&pool).await.expect("Failed to run migrations");

    pool
}

/// Create a file-backed test pool for tests that need concurrent connections.
pub async fn create_file_pool(dir: &Path) -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(dir.join("test.db"))
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    kp_db::migrate(&pool).await.expect("Failed to run migrations");

    pool
}

pub async fn create_test_user(pool: &SqlitePool) -> Uuid {
    let user = User::new(&format!("{}@test.local", Uuid::new_v4()), "not-a-real-hash");
    kp_db::UserRepository::new(pool.clone())
        .create(&user)
        .await
        .expect("Failed to create test user");
    user.id
}

/// Token pair with second-precision expiries derived from a base timestamp.
pub fn pair_at(user_id: Uuid, base_ts: i64) -> TokenPair {
    TokenPair::new(
        user_id,
        chrono::DateTime::from_timestamp(base_ts + 900, 0).unwrap(),
        chrono::DateTime::from_timestamp(base_ts + 604_800, 0).unwrap(),
        chrono::DateTime::from_timestamp(base_ts, 0).unwrap(),
    )
}

pub async fn count_token_rows(pool: &SqlitePool) -> i64 {
    use sqlx::Row;

    sqlx::query("SELECT COUNT(*) AS n FROM auth_tokens")
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
        .get("n")
}
