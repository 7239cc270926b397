//! Middleware Module
//!
//! - **`auth`** - bearer-token authentication for the protected API routes
//!
//! ```rust,no_run
//! use axum::{middleware, Router};
//! use taskboard::backend::middleware::auth_middleware;
//! use taskboard::backend::server::AppState;
//!
//! fn protect(router: Router<AppState>, state: AppState) -> Router<AppState> {
//!     router.route_layer(middleware::from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
