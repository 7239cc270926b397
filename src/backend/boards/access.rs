//! Board access checks and board assembly
//!
//! Every list and card route resolves its board first and goes through
//! [`require_member`]; board-level mutations go through [`require_owner`].
//! An unknown board is 404, a board the user doesn't belong to is 403.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::boards::db::{self, BoardRow};
use crate::backend::cards::db::cards_for_board;
use crate::backend::error::BackendError;
use crate::backend::lists::db::lists_for_board;
use crate::shared::Board;

/// Load a board the user is a member of
pub async fn require_member(
    pool: &SqlitePool,
    board_id: Uuid,
    user_id: Uuid,
) -> Result<BoardRow, BackendError> {
    let board = db::get_board(pool, board_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Board not found"))?;

    if !board.is_owner(user_id) && !db::is_member(pool, board_id, user_id).await? {
        tracing::warn!(%board_id, %user_id, "Access denied to board");
        return Err(BackendError::forbidden("Access denied"));
    }

    Ok(board)
}

/// Load a board the user owns; `action` completes "Only the board owner can ..."
pub async fn require_owner(
    pool: &SqlitePool,
    board_id: Uuid,
    user_id: Uuid,
    action: &str,
) -> Result<BoardRow, BackendError> {
    let board = db::get_board(pool, board_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Board not found"))?;

    if !board.is_owner(user_id) {
        tracing::warn!(%board_id, %user_id, action, "Owner-only action rejected");
        return Err(BackendError::forbidden(format!("Only the board owner can {}", action)));
    }

    Ok(board)
}

/// Board with members but without lists
pub async fn summary(pool: &SqlitePool, board: BoardRow) -> Result<Board, BackendError> {
    let members = db::members(pool, board.id).await?;
    Ok(board.into_board(members, Vec::new()))
}

/// Board with members, active lists and their cards
pub async fn detail(pool: &SqlitePool, board: BoardRow) -> Result<Board, BackendError> {
    let members = db::members(pool, board.id).await?;
    let mut cards = cards_for_board(pool, board.id).await?;
    let lists = lists_for_board(pool, board.id, false)
        .await?
        .into_iter()
        .map(|list| {
            let list_cards = cards.remove(&list.id).unwrap_or_default();
            list.with_cards(list_cards)
        })
        .collect();
    Ok(board.into_board(members, lists))
}
