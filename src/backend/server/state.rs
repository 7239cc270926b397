/**
 * Application State Management
 *
 * Defines `AppState` and the `FromRef` projections that let handlers extract
 * just the part they need (`State<SqlitePool>`, `State<Reindexer>`,
 * `State<AuthSettings>`).
 *
 * # Thread Safety
 *
 * Every field is cheap to clone and safe to share:
 * - `SqlitePool` is internally reference counted
 * - `Reindexer` holds a pool handle plus the shared `ParentLocks` map
 * - `AuthSettings` keeps the signing secret behind an `Arc`
 *
 * # Example
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use sqlx::SqlitePool;
 *
 * async fn handler(State(pool): State<SqlitePool>) {
 *     let _ = sqlx::query("SELECT 1").execute(&pool).await;
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::reindex::{ParentLocks, Reindexer};
use crate::backend::server::config::ServerConfig;

/// Token and password hashing settings
#[derive(Clone)]
pub struct AuthSettings {
    pub jwt_secret: Arc<str>,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            jwt_secret: Arc::from(config.jwt_secret.as_str()),
            token_ttl_hours: config.token_ttl_hours,
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Central state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub db_pool: SqlitePool,

    /// Position maintenance for lists and cards
    pub reindexer: Reindexer,

    pub auth: AuthSettings,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: &ServerConfig) -> Self {
        let reindexer = Reindexer::new(db_pool.clone(), ParentLocks::new());
        Self {
            db_pool,
            reindexer,
            auth: AuthSettings::from_config(config),
        }
    }

    /// Per-parent lock map used by the reindexer
    pub fn parent_locks(&self) -> ParentLocks {
        self.reindexer.locks().clone()
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Reindexer {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.reindexer.clone()
    }
}

impl FromRef<AppState> for AuthSettings {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}
