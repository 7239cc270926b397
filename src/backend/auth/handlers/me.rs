/**
 * Get Current User Handler
 *
 * GET /api/auth/me, behind the auth middleware.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::shared::UserSummary;

pub async fn get_me(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserSummary>, BackendError> {
    let user = get_user_by_id(&pool, user.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", user.user_id);
            BackendError::not_found("User not found")
        })?;

    Ok(Json(user.summary()))
}
