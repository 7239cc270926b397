/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * Unknown email and wrong password both return 401 with the same message.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::verify;
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::server::state::AuthSettings;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Login handler
pub async fn login(
    State(pool): State<SqlitePool>,
    State(auth): State<AuthSettings>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let user = get_user_by_email(&pool, &request.email)
        .await?
        .ok_or_else(|| {
            tracing::debug!("Login rejected: unknown email");
            BackendError::unauthorized(INVALID_CREDENTIALS)
        })?;

    let valid = verify(&request.password, &user.password_hash).map_err(|e| {
        tracing::error!("Password verification error: {:?}", e);
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    })?;

    if !valid {
        tracing::warn!(user_id = %user.id, "Login rejected: invalid password");
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse::issue(&user, &auth)?))
}
