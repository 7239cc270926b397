//! Storage Primitives
//!
//! The handful of SQL operations the reindexer is built from: count by
//! parent, find by id, shift a position range, assign a placement and delete
//! by id. All of them take a bare connection so they run inside whatever
//! transaction the caller holds; [`begin_write`] opens that transaction.

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use uuid::Uuid;

use super::plan::Shift;
use super::{Placement, Scope};

/// Open a transaction that holds SQLite's write lock from the start
///
/// A plain `BEGIN` takes the lock at the first write. Two such transactions
/// that both read first cannot upgrade and fail with `SQLITE_BUSY` instead of
/// waiting on the busy timeout.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Whether the parent row (board or list) exists
pub async fn parent_exists(
    conn: &mut SqliteConnection,
    scope: Scope,
    parent_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?", scope.parent_table());
    let row: Option<(i64,)> = sqlx::query_as(&sql)
        .bind(parent_id)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

/// Number of siblings under a parent
pub async fn count_siblings(
    conn: &mut SqliteConnection,
    scope: Scope,
    parent_id: Uuid,
) -> Result<i64, sqlx::Error> {
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE {} = ?",
        scope.table(),
        scope.parent_column()
    );
    let (count,): (i64,) = sqlx::query_as(&sql)
        .bind(parent_id)
        .fetch_one(conn)
        .await?;
    Ok(count)
}

/// Parent and position of an entity
pub async fn find_placement(
    conn: &mut SqliteConnection,
    scope: Scope,
    id: Uuid,
) -> Result<Option<Placement>, sqlx::Error> {
    let sql = format!(
        "SELECT {}, position FROM {} WHERE id = ?",
        scope.parent_column(),
        scope.table()
    );
    let row: Option<(Uuid, i64)> = sqlx::query_as(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row.map(|(parent_id, position)| Placement {
        id,
        parent_id,
        position,
    }))
}

/// Positions under a parent in ascending order
pub async fn sibling_positions(
    conn: &mut SqliteConnection,
    scope: Scope,
    parent_id: Uuid,
) -> Result<Vec<i64>, sqlx::Error> {
    let sql = format!(
        "SELECT position FROM {} WHERE {} = ? ORDER BY position",
        scope.table(),
        scope.parent_column()
    );
    let rows: Vec<(i64,)> = sqlx::query_as(&sql)
        .bind(parent_id)
        .fetch_all(conn)
        .await?;
    Ok(rows.into_iter().map(|(p,)| p).collect())
}

/// Apply `shift` to every sibling under `parent_id` except `exclude`
///
/// Returns the number of rows moved.
pub async fn shift(
    conn: &mut SqliteConnection,
    scope: Scope,
    parent_id: Uuid,
    shift: Shift,
    exclude: Uuid,
) -> Result<u64, sqlx::Error> {
    let upper = if shift.to.is_some() { " AND position <= ?" } else { "" };
    let sql = format!(
        "UPDATE {} SET position = position + ? WHERE {} = ? AND id <> ? AND position >= ?{}",
        scope.table(),
        scope.parent_column(),
        upper
    );

    let mut query = sqlx::query(&sql)
        .bind(shift.delta)
        .bind(parent_id)
        .bind(exclude)
        .bind(shift.from);
    if let Some(to) = shift.to {
        query = query.bind(to);
    }

    let result = query.execute(conn).await?;
    Ok(result.rows_affected())
}

/// Set an entity's parent and position together
pub async fn set_placement(
    conn: &mut SqliteConnection,
    scope: Scope,
    id: Uuid,
    parent_id: Uuid,
    position: i64,
) -> Result<u64, sqlx::Error> {
    let sql = format!(
        "UPDATE {} SET {} = ?, position = ?, updated_at = ? WHERE id = ?",
        scope.table(),
        scope.parent_column()
    );
    let result = sqlx::query(&sql)
        .bind(parent_id)
        .bind(position)
        .bind(chrono::Utc::now())
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

/// Delete an entity by id; dependent rows go with it through the schema's
/// cascading foreign keys
pub async fn delete(
    conn: &mut SqliteConnection,
    scope: Scope,
    id: Uuid,
) -> Result<u64, sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE id = ?", scope.table());
    let result = sqlx::query(&sql).bind(id).execute(conn).await?;
    Ok(result.rows_affected())
}
