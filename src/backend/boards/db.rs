//! Database operations for boards and board membership

use chrono::{DateTime, Utc};
use sqlx::{Row, SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::backend::reindex::store::begin_write;
use crate::shared::board::{Board, BoardList, UserSummary, Visibility, DEFAULT_BACKGROUND};

/// Board row without members or lists
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BoardRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub owner_id: Uuid,
    pub background: String,
    pub is_starred: bool,
    pub visibility: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BoardRow {
    pub fn is_owner(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    pub fn into_board(self, members: Vec<UserSummary>, lists: Vec<BoardList>) -> Board {
        Board {
            id: self.id,
            title: self.title,
            description: self.description,
            owner_id: self.owner_id,
            members,
            background: self.background,
            is_starred: self.is_starred,
            visibility: Visibility::from_str(&self.visibility).unwrap_or_default(),
            lists,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Fields for a new board, already validated
#[derive(Debug, Clone)]
pub struct NewBoard {
    pub title: String,
    pub description: String,
    pub background: Option<String>,
    pub visibility: Visibility,
}

/// Changes to a board, already validated; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct BoardChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub background: Option<String>,
    pub is_starred: Option<bool>,
    pub visibility: Option<Visibility>,
}

const BOARD_COLUMNS: &str =
    "id, title, description, owner_id, background, is_starred, visibility, created_at, updated_at";

/// Create a board and register the owner as its first member
pub async fn create_board(
    pool: &SqlitePool,
    owner_id: Uuid,
    new: NewBoard,
) -> Result<BoardRow, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let mut tx = begin_write(pool).await?;

    let sql = format!(
        r#"
        INSERT INTO boards (id, title, description, owner_id, background, is_starred, visibility, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, 0, ?, ?, ?)
        RETURNING {BOARD_COLUMNS}
        "#
    );
    let board = sqlx::query_as::<_, BoardRow>(&sql)
        .bind(id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(owner_id)
        .bind(new.background.as_deref().unwrap_or(DEFAULT_BACKGROUND))
        .bind(new.visibility.as_str())
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

    insert_member(&mut tx, id, owner_id).await?;
    tx.commit().await?;

    Ok(board)
}

async fn insert_member(
    conn: &mut SqliteConnection,
    board_id: Uuid,
    user_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO board_members (board_id, user_id, added_at) VALUES (?, ?, ?)")
        .bind(board_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(conn)
        .await?;
    Ok(())
}

/// Get a board row by ID
pub async fn get_board(pool: &SqlitePool, id: Uuid) -> Result<Option<BoardRow>, sqlx::Error> {
    let sql = format!("SELECT {BOARD_COLUMNS} FROM boards WHERE id = ?");
    sqlx::query_as::<_, BoardRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Boards the user belongs to, most recently updated first
pub async fn boards_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<BoardRow>, sqlx::Error> {
    sqlx::query_as::<_, BoardRow>(
        r#"
        SELECT b.id, b.title, b.description, b.owner_id, b.background, b.is_starred,
               b.visibility, b.created_at, b.updated_at
        FROM boards b
        JOIN board_members m ON m.board_id = b.id
        WHERE m.user_id = ?
        ORDER BY b.updated_at DESC, b.title ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Members of a board in the order they joined
pub async fn members(pool: &SqlitePool, board_id: Uuid) -> Result<Vec<UserSummary>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT u.id, u.name, u.email
        FROM board_members m
        JOIN users u ON u.id = m.user_id
        WHERE m.board_id = ?
        ORDER BY m.added_at ASC, u.name ASC
        "#,
    )
    .bind(board_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| UserSummary {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
        })
        .collect())
}

/// Whether the user is a member of the board
pub async fn is_member(pool: &SqlitePool, board_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT 1 FROM board_members WHERE board_id = ? AND user_id = ?")
            .bind(board_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    Ok(row.is_some())
}

/// Add a member; returns `false` if they already belonged to the board
pub async fn add_member(pool: &SqlitePool, board_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT OR IGNORE INTO board_members (board_id, user_id, added_at) VALUES (?, ?, ?)",
    )
    .bind(board_id)
    .bind(user_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Remove a member; returns `false` if they were not a member
pub async fn remove_member(pool: &SqlitePool, board_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM board_members WHERE board_id = ? AND user_id = ?")
        .bind(board_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Apply changes and bump `updated_at`
pub async fn update_board(
    pool: &SqlitePool,
    id: Uuid,
    changes: BoardChanges,
) -> Result<Option<BoardRow>, sqlx::Error> {
    let sql = format!(
        r#"
        UPDATE boards SET
            title = COALESCE(?, title),
            description = COALESCE(?, description),
            background = COALESCE(?, background),
            is_starred = COALESCE(?, is_starred),
            visibility = COALESCE(?, visibility),
            updated_at = ?
        WHERE id = ?
        RETURNING {BOARD_COLUMNS}
        "#
    );
    sqlx::query_as::<_, BoardRow>(&sql)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.background)
        .bind(changes.is_starred)
        .bind(changes.visibility.map(|v| v.as_str()))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Delete a board; lists, cards, members and activity cascade
pub async fn delete_board(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM boards WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() == 1)
}
