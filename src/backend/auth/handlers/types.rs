/**
 * Authentication Handler Types
 *
 * Request and response bodies for register, login and me.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::server::state::AuthSettings;
use crate::shared::UserSummary;

/// Registration request
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    /// Plain password, hashed before storage
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by register and login
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
    pub user: UserSummary,
}

impl AuthResponse {
    /// Issue a fresh token for `user`
    pub fn issue(user: &User, auth: &AuthSettings) -> Result<Self, BackendError> {
        let token = create_token(user.id, &user.email, &auth.jwt_secret, auth.token_ttl_hours)
            .map_err(|e| {
                tracing::error!("Failed to create token: {:?}", e);
                BackendError::handler(
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error",
                )
            })?;

        Ok(Self {
            token,
            user: user.summary(),
        })
    }
}
