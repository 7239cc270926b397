//! Card HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::boards::{activity, require_member};
use crate::backend::cards::db;
use crate::backend::error::BackendError;
use crate::backend::lists::db::get_list;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::reindex::{Reindexer, Scope};
use crate::shared::board::{
    normalize_labels, validate_title, CreateCardRequest, MoveCardRequest, UpdateCardRequest,
    UpdateDueDateRequest, UpdateLabelsRequest,
};
use crate::shared::Card;

/// Resolve the board behind a list and check membership
async fn list_board(pool: &SqlitePool, list_id: Uuid, user_id: Uuid) -> Result<Uuid, BackendError> {
    let list = get_list(pool, list_id)
        .await?
        .ok_or_else(|| BackendError::not_found("List not found"))?;
    require_member(pool, list.board_id, user_id).await?;
    Ok(list.board_id)
}

/// Load a card whose board the user belongs to, returning it with its board id
async fn load_card(pool: &SqlitePool, card_id: Uuid, user_id: Uuid) -> Result<(Card, Uuid), BackendError> {
    let card = db::get_card(pool, card_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Card not found"))?;
    let board_id = db::board_id_for_card(pool, card_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Card not found"))?;
    require_member(pool, board_id, user_id).await?;
    Ok((card, board_id))
}

/// GET /api/lists/{list_id}/cards
pub async fn get_cards(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(list_id): Path<Uuid>,
) -> Result<Json<Vec<Card>>, BackendError> {
    list_board(&pool, list_id, user.user_id).await?;
    Ok(Json(db::cards_for_list(&pool, list_id).await?))
}

/// POST /api/lists/{list_id}/cards
///
/// The new card takes the next position in the list.
pub async fn create_card(
    State(pool): State<SqlitePool>,
    State(reindexer): State<Reindexer>,
    AuthUser(user): AuthUser,
    Path(list_id): Path<Uuid>,
    Json(request): Json<CreateCardRequest>,
) -> Result<(StatusCode, Json<Card>), BackendError> {
    let board_id = list_board(&pool, list_id, user.user_id).await?;
    let title = validate_title("title", &request.title)?;
    let description = request.description.unwrap_or_default().trim().to_string();

    let card = reindexer
        .append(Scope::Cards, list_id, move |conn, position| {
            Box::pin(async move { db::insert_card(conn, list_id, &title, &description, position).await })
        })
        .await?;

    tracing::info!(card_id = %card.id, %list_id, position = card.position, "Card created");
    activity::log(&pool, board_id, user.user_id, "created_card", Some(&card.title)).await;

    Ok((StatusCode::CREATED, Json(card)))
}

/// GET /api/cards/{card_id}
pub async fn get_card(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(card_id): Path<Uuid>,
) -> Result<Json<Card>, BackendError> {
    let (card, _) = load_card(&pool, card_id, user.user_id).await?;
    Ok(Json(card))
}

/// PUT /api/cards/{card_id}
pub async fn update_card(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(card_id): Path<Uuid>,
    Json(request): Json<UpdateCardRequest>,
) -> Result<Json<Card>, BackendError> {
    let (_, board_id) = load_card(&pool, card_id, user.user_id).await?;

    let title = request.title.as_deref().map(|t| validate_title("title", t)).transpose()?;
    let description = request.description.as_deref().map(str::trim);

    let card = db::update_card(&pool, card_id, title.as_deref(), description)
        .await?
        .ok_or_else(|| BackendError::not_found("Card not found"))?;
    activity::log(&pool, board_id, user.user_id, "updated_card", Some(&card.title)).await;

    Ok(Json(card))
}

/// DELETE /api/cards/{card_id}
pub async fn delete_card(
    State(pool): State<SqlitePool>,
    State(reindexer): State<Reindexer>,
    AuthUser(user): AuthUser,
    Path(card_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    let (card, board_id) = load_card(&pool, card_id, user.user_id).await?;

    let removed = reindexer.remove(Scope::Cards, card_id).await?;
    tracing::info!(%card_id, list_id = %removed.parent_id, position = removed.position, "Card deleted");
    activity::log(&pool, board_id, user.user_id, "deleted_card", Some(&card.title)).await;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/cards/{card_id}/move
///
/// Same list: reorder. Different list: close the gap in the source, open a
/// slot in the destination. The destination list must be on a board the user
/// belongs to.
pub async fn move_card(
    State(pool): State<SqlitePool>,
    State(reindexer): State<Reindexer>,
    AuthUser(user): AuthUser,
    Path(card_id): Path<Uuid>,
    Json(request): Json<MoveCardRequest>,
) -> Result<Json<Card>, BackendError> {
    let (card, _) = load_card(&pool, card_id, user.user_id).await?;
    let dest_board = list_board(&pool, request.list_id, user.user_id).await?;

    let placement = reindexer
        .transfer(Scope::Cards, card_id, request.list_id, request.position)
        .await?;

    let details = format!("{} to position {}", card.title, placement.position);
    activity::log(&pool, dest_board, user.user_id, "moved_card", Some(&details)).await;

    let card = db::get_card(&pool, card_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Card not found"))?;
    Ok(Json(card))
}

/// PUT /api/cards/{card_id}/labels
pub async fn update_labels(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(card_id): Path<Uuid>,
    Json(request): Json<UpdateLabelsRequest>,
) -> Result<Json<Card>, BackendError> {
    let (_, board_id) = load_card(&pool, card_id, user.user_id).await?;

    let labels = normalize_labels(request.labels);
    let card = db::set_labels(&pool, card_id, labels)
        .await?
        .ok_or_else(|| BackendError::not_found("Card not found"))?;
    activity::log(&pool, board_id, user.user_id, "updated_labels", Some(&card.title)).await;

    Ok(Json(card))
}

/// PUT /api/cards/{card_id}/due-date
pub async fn update_due_date(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(card_id): Path<Uuid>,
    Json(request): Json<UpdateDueDateRequest>,
) -> Result<Json<Card>, BackendError> {
    let (_, board_id) = load_card(&pool, card_id, user.user_id).await?;

    let card = db::set_due_date(&pool, card_id, request.due_date)
        .await?
        .ok_or_else(|| BackendError::not_found("Card not found"))?;
    let action = if card.due_date.is_some() { "set_due_date" } else { "cleared_due_date" };
    activity::log(&pool, board_id, user.user_id, action, Some(&card.title)).await;

    Ok(Json(card))
}
