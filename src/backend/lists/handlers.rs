//! List HTTP handlers
//!
//! Creation, deletion and moves go through the [`Reindexer`] so the board's
//! list positions stay dense.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::boards::{activity, require_member};
use crate::backend::cards::db::{cards_for_board, cards_for_list};
use crate::backend::error::BackendError;
use crate::backend::lists::db::{self, ListRow};
use crate::backend::middleware::auth::AuthUser;
use crate::backend::reindex::{Reindexer, Scope};
use crate::shared::board::{validate_title, CreateListRequest, MoveListRequest, UpdateListRequest};
use crate::shared::BoardList;

/// Load a list whose board the user belongs to
async fn load_list(pool: &SqlitePool, list_id: Uuid, user_id: Uuid) -> Result<ListRow, BackendError> {
    let list = db::get_list(pool, list_id)
        .await?
        .ok_or_else(|| BackendError::not_found("List not found"))?;
    require_member(pool, list.board_id, user_id).await?;
    Ok(list)
}

/// Re-read a list after a change and attach its cards
async fn list_with_cards(pool: &SqlitePool, list_id: Uuid) -> Result<BoardList, BackendError> {
    let list = db::get_list(pool, list_id)
        .await?
        .ok_or_else(|| BackendError::not_found("List not found"))?;
    let cards = cards_for_list(pool, list_id).await?;
    Ok(list.with_cards(cards))
}

async fn board_lists(pool: &SqlitePool, board_id: Uuid, archived: bool) -> Result<Vec<BoardList>, BackendError> {
    let mut cards = cards_for_board(pool, board_id).await?;
    Ok(db::lists_for_board(pool, board_id, archived)
        .await?
        .into_iter()
        .map(|list| {
            let list_cards = cards.remove(&list.id).unwrap_or_default();
            list.with_cards(list_cards)
        })
        .collect())
}

/// GET /api/boards/{board_id}/lists
pub async fn get_lists(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<Json<Vec<BoardList>>, BackendError> {
    require_member(&pool, board_id, user.user_id).await?;
    Ok(Json(board_lists(&pool, board_id, false).await?))
}

/// GET /api/boards/{board_id}/lists/archived
pub async fn get_archived_lists(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<Json<Vec<BoardList>>, BackendError> {
    require_member(&pool, board_id, user.user_id).await?;
    Ok(Json(board_lists(&pool, board_id, true).await?))
}

/// POST /api/boards/{board_id}/lists
///
/// The new list takes the next position on the board.
pub async fn create_list(
    State(pool): State<SqlitePool>,
    State(reindexer): State<Reindexer>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<Uuid>,
    Json(request): Json<CreateListRequest>,
) -> Result<(StatusCode, Json<BoardList>), BackendError> {
    require_member(&pool, board_id, user.user_id).await?;
    let title = validate_title("title", &request.title)?;

    let list = reindexer
        .append(Scope::Lists, board_id, move |conn, position| {
            Box::pin(async move { db::insert_list(conn, board_id, &title, position).await })
        })
        .await?;

    tracing::info!(list_id = %list.id, %board_id, position = list.position, "List created");
    activity::log(&pool, board_id, user.user_id, "created_list", Some(&list.title)).await;

    Ok((StatusCode::CREATED, Json(list.with_cards(Vec::new()))))
}

/// GET /api/lists/{list_id}
pub async fn get_list(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(list_id): Path<Uuid>,
) -> Result<Json<BoardList>, BackendError> {
    let list = load_list(&pool, list_id, user.user_id).await?;
    let cards = cards_for_list(&pool, list_id).await?;
    Ok(Json(list.with_cards(cards)))
}

/// PUT /api/lists/{list_id}
pub async fn update_list(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(list_id): Path<Uuid>,
    Json(request): Json<UpdateListRequest>,
) -> Result<Json<BoardList>, BackendError> {
    let list = load_list(&pool, list_id, user.user_id).await?;
    let title = validate_title("title", &request.title)?;

    db::rename_list(&pool, list_id, &title)
        .await?
        .ok_or_else(|| BackendError::not_found("List not found"))?;
    activity::log(&pool, list.board_id, user.user_id, "renamed_list", Some(&title)).await;

    Ok(Json(list_with_cards(&pool, list_id).await?))
}

/// DELETE /api/lists/{list_id}
///
/// Cards go with the list; the remaining lists close the gap.
pub async fn delete_list(
    State(pool): State<SqlitePool>,
    State(reindexer): State<Reindexer>,
    AuthUser(user): AuthUser,
    Path(list_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    let list = load_list(&pool, list_id, user.user_id).await?;

    let removed = reindexer.remove(Scope::Lists, list_id).await?;
    tracing::info!(%list_id, board_id = %removed.parent_id, position = removed.position, "List deleted");
    activity::log(&pool, removed.parent_id, user.user_id, "deleted_list", Some(&list.title)).await;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/lists/{list_id}/move
///
/// Reorders within the board, or moves to `board_id` when it names another
/// board the user belongs to.
pub async fn move_list(
    State(pool): State<SqlitePool>,
    State(reindexer): State<Reindexer>,
    AuthUser(user): AuthUser,
    Path(list_id): Path<Uuid>,
    Json(request): Json<MoveListRequest>,
) -> Result<Json<BoardList>, BackendError> {
    let list = load_list(&pool, list_id, user.user_id).await?;

    let placement = match request.board_id {
        Some(dest) if dest != list.board_id => {
            require_member(&pool, dest, user.user_id).await?;
            reindexer.transfer(Scope::Lists, list_id, dest, request.position).await?
        }
        _ => reindexer.reorder(Scope::Lists, list_id, request.position).await?,
    };

    let details = format!("{} to position {}", list.title, placement.position);
    activity::log(&pool, placement.parent_id, user.user_id, "moved_list", Some(&details)).await;

    Ok(Json(list_with_cards(&pool, list_id).await?))
}

/// PUT /api/lists/{list_id}/archive
pub async fn toggle_archive(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(list_id): Path<Uuid>,
) -> Result<Json<BoardList>, BackendError> {
    load_list(&pool, list_id, user.user_id).await?;

    let list = db::toggle_archived(&pool, list_id)
        .await?
        .ok_or_else(|| BackendError::not_found("List not found"))?;
    let action = if list.archived { "archived_list" } else { "restored_list" };
    activity::log(&pool, list.board_id, user.user_id, action, Some(&list.title)).await;

    let cards = cards_for_list(&pool, list_id).await?;
    Ok(Json(list.with_cards(cards)))
}
