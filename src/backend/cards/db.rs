//! Database operations for cards
//!
//! Labels are stored as a JSON array in a TEXT column.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::shared::board::Card;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CardRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub list_id: Uuid,
    pub position: i64,
    pub labels: Json<Vec<String>>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CardRow> for Card {
    fn from(row: CardRow) -> Self {
        Card {
            id: row.id,
            title: row.title,
            description: row.description,
            list_id: row.list_id,
            position: row.position,
            labels: row.labels.0,
            due_date: row.due_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const CARD_COLUMNS: &str =
    "id, title, description, list_id, position, labels, due_date, created_at, updated_at";

/// Insert a card at `position`; run inside the reindexer's transaction
pub async fn insert_card(
    conn: &mut SqliteConnection,
    list_id: Uuid,
    title: &str,
    description: &str,
    position: i64,
) -> Result<Card, sqlx::Error> {
    let now = Utc::now();
    let sql = format!(
        r#"
        INSERT INTO cards (id, title, description, list_id, position, labels, due_date, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, '[]', NULL, ?, ?)
        RETURNING {CARD_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, CardRow>(&sql)
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(description)
        .bind(list_id)
        .bind(position)
        .bind(now)
        .bind(now)
        .fetch_one(conn)
        .await?;
    Ok(row.into())
}

/// Get a card by ID
pub async fn get_card(pool: &SqlitePool, id: Uuid) -> Result<Option<Card>, sqlx::Error> {
    let sql = format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = ?");
    let row = sqlx::query_as::<_, CardRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Card::from))
}

/// Cards of one list by position
pub async fn cards_for_list(pool: &SqlitePool, list_id: Uuid) -> Result<Vec<Card>, sqlx::Error> {
    let sql = format!("SELECT {CARD_COLUMNS} FROM cards WHERE list_id = ? ORDER BY position ASC");
    let rows = sqlx::query_as::<_, CardRow>(&sql)
        .bind(list_id)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Card::from).collect())
}

/// Cards of every list on a board, grouped by list and ordered by position
pub async fn cards_for_board(
    pool: &SqlitePool,
    board_id: Uuid,
) -> Result<HashMap<Uuid, Vec<Card>>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CardRow>(
        r#"
        SELECT c.id, c.title, c.description, c.list_id, c.position, c.labels, c.due_date,
               c.created_at, c.updated_at
        FROM cards c
        JOIN lists l ON l.id = c.list_id
        WHERE l.board_id = ?
        ORDER BY c.list_id, c.position ASC
        "#,
    )
    .bind(board_id)
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<Uuid, Vec<Card>> = HashMap::new();
    for row in rows {
        grouped.entry(row.list_id).or_default().push(row.into());
    }
    Ok(grouped)
}

/// Board that owns a card (through its list)
pub async fn board_id_for_card(pool: &SqlitePool, card_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        "SELECT l.board_id FROM cards c JOIN lists l ON l.id = c.list_id WHERE c.id = ?",
    )
    .bind(card_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(id,)| id))
}

/// Update title and/or description
pub async fn update_card(
    pool: &SqlitePool,
    id: Uuid,
    title: Option<&str>,
    description: Option<&str>,
) -> Result<Option<Card>, sqlx::Error> {
    let sql = format!(
        r#"
        UPDATE cards SET
            title = COALESCE(?, title),
            description = COALESCE(?, description),
            updated_at = ?
        WHERE id = ?
        RETURNING {CARD_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, CardRow>(&sql)
        .bind(title)
        .bind(description)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Card::from))
}

/// Replace the label set
pub async fn set_labels(pool: &SqlitePool, id: Uuid, labels: Vec<String>) -> Result<Option<Card>, sqlx::Error> {
    let sql = format!("UPDATE cards SET labels = ?, updated_at = ? WHERE id = ? RETURNING {CARD_COLUMNS}");
    let row = sqlx::query_as::<_, CardRow>(&sql)
        .bind(Json(labels))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Card::from))
}

/// Set or clear the due date
pub async fn set_due_date(
    pool: &SqlitePool,
    id: Uuid,
    due_date: Option<DateTime<Utc>>,
) -> Result<Option<Card>, sqlx::Error> {
    let sql = format!("UPDATE cards SET due_date = ?, updated_at = ? WHERE id = ? RETURNING {CARD_COLUMNS}");
    let row = sqlx::query_as::<_, CardRow>(&sql)
        .bind(due_date)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Card::from))
}
