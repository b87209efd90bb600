//! Integration tests for the token pair repository

mod common;

use crate::common::{count_token_rows, create_file_pool, create_test_pool, create_test_user, pair_at};

use kp_db::TokenPairRepository;

use chrono::Utc;
use uuid::Uuid;

#[tokio::test]
async fn upsert_then_find_returns_stored_pair() {
    let pool = create_test_pool().await;
    let user_id = create_test_user(&pool).await;
    let repo = TokenPairRepository::new(pool.clone());
    let pair = pair_at(user_id, Utc::now().timestamp());

    repo.upsert(&pair).await.unwrap();

    let found = repo.find_by_user(user_id).await.unwrap().unwrap();
    assert_eq!(found, pair);
}

#[tokio::test]
async fn find_for_unknown_user_returns_none() {
    let pool = create_test_pool().await;
    let repo = TokenPairRepository::new(pool);

    let found = repo.find_by_user(Uuid::new_v4()).await.unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn reissuing_for_same_user_keeps_exactly_one_row() {
    let pool = create_test_pool().await;
    let user_id = create_test_user(&pool).await;
    let repo = TokenPairRepository::new(pool.clone());
    let base = Utc::now().timestamp();

    repo.upsert(&pair_at(user_id, base)).await.unwrap();
    repo.upsert(&pair_at(user_id, base + 60)).await.unwrap();
    repo.upsert(&pair_at(user_id, base + 120)).await.unwrap();

    assert_eq!(count_token_rows(&pool).await, 1);
    let found = repo.find_by_user(user_id).await.unwrap().unwrap();
    assert_eq!(found.updated_at.timestamp(), base + 120);
}

#[tokio::test]
async fn update_with_no_row_returns_false_and_creates_nothing() {
    let pool = create_test_pool().await;
    let user_id = create_test_user(&pool).await;
    let repo = TokenPairRepository::new(pool.clone());

    let updated = repo
        .update(&pair_at(user_id, Utc::now().timestamp()))
        .await
        .unwrap();

    assert!(!updated);
    assert_eq!(count_token_rows(&pool).await, 0);
}

#[tokio::test]
async fn update_overwrites_existing_expiries() {
    let pool = create_test_pool().await;
    let user_id = create_test_user(&pool).await;
    let repo = TokenPairRepository::new(pool.clone());
    let base = Utc::now().timestamp();

    repo.upsert(&pair_at(user_id, base)).await.unwrap();
    let rotated = pair_at(user_id, base + 120);
    let updated = repo.update(&rotated).await.unwrap();

    assert!(updated);
    let found = repo.find_by_user(user_id).await.unwrap().unwrap();
    assert_eq!(found, rotated);
}

#[tokio::test]
async fn delete_by_user_removes_the_row() {
    let pool = create_test_pool().await;
    let user_id = create_test_user(&pool).await;
    let repo = TokenPairRepository::new(pool.clone());

    repo.upsert(&pair_at(user_id, Utc::now().timestamp()))
        .await
        .unwrap();

    assert!(repo.delete_by_user(user_id).await.unwrap());
    assert!(!repo.delete_by_user(user_id).await.unwrap());
    assert_eq!(count_token_rows(&pool).await, 0);
}

#[tokio::test]
async fn deleting_user_cascades_to_token_row() {
    let pool = create_test_pool().await;
    let user_id = create_test_user(&pool).await;
    let repo = TokenPairRepository::new(pool.clone());

    repo.upsert(&pair_at(user_id, Utc::now().timestamp()))
        .await
        .unwrap();

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id.to_string())
        .execute(&pool)
        .await
        .unwrap();

    assert_eq!(count_token_rows(&pool).await, 0);
}

#[tokio::test]
async fn concurrent_rotations_leave_one_coherent_row() {
    let dir = tempfile::tempdir().unwrap();
    let pool = create_file_pool(dir.path()).await;
    let user_id = create_test_user(&pool).await;
    let repo = TokenPairRepository::new(pool.clone());
    let base = Utc::now().timestamp();

    repo.upsert(&pair_at(user_id, base)).await.unwrap();

    let first = pair_at(user_id, base + 100);
    let second = pair_at(user_id, base + 200);

    let repo_a = repo.clone();
    let repo_b = repo.clone();
    let pair_a = first.clone();
    let pair_b = second.clone();
    let (a, b) = tokio::join!(
        tokio::spawn(async move { repo_a.update(&pair_a).await }),
        tokio::spawn(async move { repo_b.update(&pair_b).await }),
    );
    assert!(a.unwrap().unwrap());
    assert!(b.unwrap().unwrap());

    // Exactly one row survives and it is one of the two pairs in full -
    // never an interleaving of both.
    assert_eq!(count_token_rows(&pool).await, 1);
    let found = repo.find_by_user(user_id).await.unwrap().unwrap();
    assert!(found == first || found == second);
}
