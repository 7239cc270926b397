//! Database migration tests
//!
//! The schema is in place and foreign keys are enforced on pool connections.

use chrono::Utc;
use uuid::Uuid;

use crate::common::{create_unique_test_user, TestDatabase};

#[tokio::test]
async fn test_tables_exist() {
    let db = TestDatabase::new().await;

    for table in ["users", "boards", "board_members", "board_activity", "lists", "cards"] {
        let sql = format!("SELECT 1 FROM {table} LIMIT 1");
        let result = sqlx::query(&sql).execute(db.pool()).await;
        assert!(result.is_ok(), "{table} table should exist");
    }
}

#[tokio::test]
async fn test_foreign_keys_are_enforced() {
    let db = TestDatabase::new().await;
    let now = Utc::now();

    let result = sqlx::query(
        "INSERT INTO lists (id, title, board_id, position, archived, created_at, updated_at) VALUES (?, ?, ?, 0, 0, ?, ?)",
    )
    .bind(Uuid::new_v4())
    .bind("Orphan")
    .bind(Uuid::new_v4())
    .bind(now)
    .bind(now)
    .execute(db.pool())
    .await;

    assert!(result.is_err(), "List without a board should be rejected");
}

#[tokio::test]
async fn test_deleting_user_cascades_to_owned_boards() {
    let db = TestDatabase::new().await;
    let user = create_unique_test_user(db.pool()).await;
    crate::integration::reindex::new_board(&db, user.id, "Owned").await;
    assert_eq!(db.count("boards").await, 1);

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user.id)
        .execute(db.pool())
        .await
        .unwrap();

    assert_eq!(db.count("boards").await, 0);
    assert_eq!(db.count("board_members").await, 0);
}
