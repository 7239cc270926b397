/**
 * Register Handler
 *
 * POST /api/auth/register
 *
 * 1. Validate name, email and password
 * 2. Reject an email that is already registered (409)
 * 3. Hash the password with bcrypt
 * 4. Create the user and return a token (201)
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::hash;
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest};
use crate::backend::auth::users::{create_user, get_user_by_email, is_unique_violation, normalize_email};
use crate::backend::error::BackendError;
use crate::backend::server::state::AuthSettings;
use crate::shared::board::validate_title;
use crate::shared::SharedError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Check the registration fields, returning the trimmed name
fn validate(request: &RegisterRequest) -> Result<String, SharedError> {
    let name = validate_title("name", &request.name)?;

    let email = normalize_email(&request.email);
    let valid_email = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    };
    if !valid_email {
        return Err(SharedError::validation("email", "invalid email format"));
    }

    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }

    Ok(name)
}

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - invalid name, email or password
/// * `409 Conflict` - email already registered
/// * `500 Internal Server Error` - hashing, storage or token failure
pub async fn register(
    State(pool): State<SqlitePool>,
    State(auth): State<AuthSettings>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let name = validate(&request).map_err(|e| {
        tracing::warn!("Rejected registration: {}", e);
        e
    })?;

    if get_user_by_email(&pool, &request.email).await?.is_some() {
        tracing::debug!("Registration rejected: email already registered");
        return Err(BackendError::conflict("Email already registered"));
    }

    let password_hash = hash(&request.password, auth.bcrypt_cost).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    })?;

    let user = create_user(&pool, name, request.email.clone(), password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                tracing::debug!("Registration rejected: email registered concurrently");
                BackendError::conflict("Email already registered")
            } else {
                tracing::error!("Failed to create user: {:?}", e);
                BackendError::from(e)
            }
        })?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(AuthResponse::issue(&user, &auth)?)))
}
