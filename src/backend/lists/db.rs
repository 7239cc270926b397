//! Database operations for lists
//!
//! Positions are never written here; they belong to the reindexer. Inserts
//! take the position the reindexer hands to its `append` callback.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::shared::board::{BoardList, Card};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ListRow {
    pub id: Uuid,
    pub title: String,
    pub board_id: Uuid,
    pub position: i64,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListRow {
    pub fn with_cards(self, cards: Vec<Card>) -> BoardList {
        BoardList {
            id: self.id,
            title: self.title,
            board_id: self.board_id,
            position: self.position,
            archived: self.archived,
            cards,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const LIST_COLUMNS: &str = "id, title, board_id, position, archived, created_at, updated_at";

/// Insert a list at `position`; run inside the reindexer's transaction
pub async fn insert_list(
    conn: &mut SqliteConnection,
    board_id: Uuid,
    title: &str,
    position: i64,
) -> Result<ListRow, sqlx::Error> {
    let now = Utc::now();
    let sql = format!(
        r#"
        INSERT INTO lists (id, title, board_id, position, archived, created_at, updated_at)
        VALUES (?, ?, ?, ?, 0, ?, ?)
        RETURNING {LIST_COLUMNS}
        "#
    );
    sqlx::query_as::<_, ListRow>(&sql)
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(board_id)
        .bind(position)
        .bind(now)
        .bind(now)
        .fetch_one(conn)
        .await
}

/// Get a list by ID
pub async fn get_list(pool: &SqlitePool, id: Uuid) -> Result<Option<ListRow>, sqlx::Error> {
    let sql = format!("SELECT {LIST_COLUMNS} FROM lists WHERE id = ?");
    sqlx::query_as::<_, ListRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Lists of a board with the given archived flag, by position
pub async fn lists_for_board(
    pool: &SqlitePool,
    board_id: Uuid,
    archived: bool,
) -> Result<Vec<ListRow>, sqlx::Error> {
    let sql = format!(
        "SELECT {LIST_COLUMNS} FROM lists WHERE board_id = ? AND archived = ? ORDER BY position ASC"
    );
    sqlx::query_as::<_, ListRow>(&sql)
        .bind(board_id)
        .bind(archived)
        .fetch_all(pool)
        .await
}

/// Rename a list
pub async fn rename_list(pool: &SqlitePool, id: Uuid, title: &str) -> Result<Option<ListRow>, sqlx::Error> {
    let sql = format!("UPDATE lists SET title = ?, updated_at = ? WHERE id = ? RETURNING {LIST_COLUMNS}");
    sqlx::query_as::<_, ListRow>(&sql)
        .bind(title)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Flip the archived flag; the list keeps its position
pub async fn toggle_archived(pool: &SqlitePool, id: Uuid) -> Result<Option<ListRow>, sqlx::Error> {
    let sql = format!(
        "UPDATE lists SET archived = NOT archived, updated_at = ? WHERE id = ? RETURNING {LIST_COLUMNS}"
    );
    sqlx::query_as::<_, ListRow>(&sql)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await
}
