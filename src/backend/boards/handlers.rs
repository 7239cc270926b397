//! Board HTTP handlers
//!
//! All routes here sit behind the auth middleware.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::boards::access::{self, require_member, require_owner};
use crate::backend::boards::activity;
use crate::backend::boards::db::{self, BoardChanges, NewBoard};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::shared::board::{
    validate_title, AddMemberRequest, CreateBoardRequest, UpdateBoardRequest,
};
use crate::shared::{Activity, Board, SharedError};

/// Accepts `#rgb` / `#rrggbb` colours, or anything else non-empty (image URLs)
fn validate_background(background: &str) -> Result<String, SharedError> {
    let background = background.trim();
    if background.is_empty() {
        return Err(SharedError::validation("background", "must not be empty"));
    }
    if let Some(hex) = background.strip_prefix('#') {
        let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(SharedError::validation("background", "invalid colour"));
        }
    }
    Ok(background.to_string())
}

/// GET /api/boards
pub async fn list_boards(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Board>>, BackendError> {
    let rows = db::boards_for_user(&pool, user.user_id).await?;
    let mut boards = Vec::with_capacity(rows.len());
    for row in rows {
        boards.push(access::summary(&pool, row).await?);
    }
    Ok(Json(boards))
}

/// POST /api/boards
pub async fn create_board(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateBoardRequest>,
) -> Result<(StatusCode, Json<Board>), BackendError> {
    let new = NewBoard {
        title: validate_title("title", &request.title)?,
        description: request.description.unwrap_or_default().trim().to_string(),
        background: request.background.as_deref().map(validate_background).transpose()?,
        visibility: request.visibility.unwrap_or_default(),
    };

    let row = db::create_board(&pool, user.user_id, new).await?;
    tracing::info!(board_id = %row.id, owner = %user.user_id, "Board created");
    activity::log(&pool, row.id, user.user_id, "created_board", Some(&row.title)).await;

    Ok((StatusCode::CREATED, Json(access::summary(&pool, row).await?)))
}

/// GET /api/boards/{board_id}
pub async fn get_board(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<Json<Board>, BackendError> {
    let row = require_member(&pool, board_id, user.user_id).await?;
    Ok(Json(access::detail(&pool, row).await?))
}

/// PUT /api/boards/{board_id}
pub async fn update_board(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<Uuid>,
    Json(request): Json<UpdateBoardRequest>,
) -> Result<Json<Board>, BackendError> {
    require_owner(&pool, board_id, user.user_id, "update board details").await?;

    let changes = BoardChanges {
        title: request.title.as_deref().map(|t| validate_title("title", t)).transpose()?,
        description: request.description.map(|d| d.trim().to_string()),
        background: request.background.as_deref().map(validate_background).transpose()?,
        is_starred: request.is_starred,
        visibility: request.visibility,
    };

    let row = db::update_board(&pool, board_id, changes)
        .await?
        .ok_or_else(|| BackendError::not_found("Board not found"))?;
    activity::log(&pool, board_id, user.user_id, "updated_board", Some(&row.title)).await;

    Ok(Json(access::detail(&pool, row).await?))
}

/// DELETE /api/boards/{board_id}
pub async fn delete_board(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    require_owner(&pool, board_id, user.user_id, "delete board").await?;

    if !db::delete_board(&pool, board_id).await? {
        return Err(BackendError::not_found("Board not found"));
    }
    tracing::info!(%board_id, "Board deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/boards/{board_id}/members
pub async fn add_member(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<Uuid>,
    Json(request): Json<AddMemberRequest>,
) -> Result<Json<Board>, BackendError> {
    let board = require_owner(&pool, board_id, user.user_id, "add members").await?;

    let member = get_user_by_id(&pool, request.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    if !db::add_member(&pool, board_id, member.id).await? {
        return Err(BackendError::conflict("User is already a member"));
    }

    tracing::info!(%board_id, member = %member.id, "Member added");
    activity::log(&pool, board_id, user.user_id, "added_member", Some(&member.name)).await;

    Ok(Json(access::summary(&pool, board).await?))
}

/// DELETE /api/boards/{board_id}/members/{user_id}
pub async fn remove_member(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path((board_id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Board>, BackendError> {
    let board = require_owner(&pool, board_id, user.user_id, "remove members").await?;

    if board.is_owner(member_id) {
        return Err(BackendError::bad_request("Cannot remove board owner"));
    }

    if !db::remove_member(&pool, board_id, member_id).await? {
        return Err(BackendError::not_found("User is not a member of this board"));
    }

    tracing::info!(%board_id, member = %member_id, "Member removed");
    activity::log(&pool, board_id, user.user_id, "removed_member", None).await;

    Ok(Json(access::summary(&pool, board).await?))
}

/// GET /api/boards/{board_id}/activity
pub async fn get_activity(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<Json<Vec<Activity>>, BackendError> {
    require_member(&pool, board_id, user.user_id).await?;
    Ok(Json(activity::recent(&pool, board_id).await?))
}
