//! Board Activity Log
//!
//! Each board keeps its most recent [`ACTIVITY_LIMIT`] actions, newest first.
//! Inserting an entry, trimming the overflow and touching the board happen in
//! one transaction.

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::backend::reindex::store::begin_write;
use crate::shared::board::{Activity, ACTIVITY_LIMIT};

/// Append an entry at the head of the board's log, trim the tail and bump
/// the board's `updated_at`
pub async fn record(
    pool: &SqlitePool,
    board_id: Uuid,
    user_id: Uuid,
    action: &str,
    details: Option<&str>,
) -> Result<(), sqlx::Error> {
    let mut tx = begin_write(pool).await?;

    sqlx::query(
        "INSERT INTO board_activity (board_id, user_id, action, details, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(board_id)
    .bind(user_id)
    .bind(action)
    .bind(details)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        DELETE FROM board_activity
        WHERE board_id = ?
          AND seq NOT IN (
              SELECT seq FROM board_activity WHERE board_id = ? ORDER BY seq DESC LIMIT ?
          )
        "#,
    )
    .bind(board_id)
    .bind(board_id)
    .bind(ACTIVITY_LIMIT as i64)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE boards SET updated_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(board_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await
}

/// Record an entry, logging instead of failing the request if it can't be written
pub async fn log(pool: &SqlitePool, board_id: Uuid, user_id: Uuid, action: &str, details: Option<&str>) {
    if let Err(e) = record(pool, board_id, user_id, action, details).await {
        tracing::warn!(%board_id, action, "Failed to record board activity: {}", e);
    }
}

/// The board's log, most recent first
pub async fn recent(pool: &SqlitePool, board_id: Uuid) -> Result<Vec<Activity>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT user_id, action, details, created_at
        FROM board_activity
        WHERE board_id = ?
        ORDER BY seq DESC
        LIMIT ?
        "#,
    )
    .bind(board_id)
    .bind(ACTIVITY_LIMIT as i64)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Activity {
            user_id: row.get("user_id"),
            action: row.get("action"),
            details: row.get("details"),
            timestamp: row.get("created_at"),
        })
        .collect())
}
