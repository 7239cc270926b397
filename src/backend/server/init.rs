/**
 * Server Initialization
 *
 * Builds the application: database pool, shared state, optional demo data,
 * router, and the background task that prunes idle parent locks.
 *
 * # Initialization Process
 *
 * 1. Open the SQLite pool and run migrations
 * 2. Create `AppState` (pool, reindexer, auth settings)
 * 3. Seed demo data when `SEED_DEMO_DATA` is set
 * 4. Create the router
 * 5. Spawn the periodic lock cleanup
 */

use std::time::Duration;

use axum::Router;

use crate::backend::reindex::ParentLocks;
use crate::backend::routes::router::create_router;
use crate::backend::seed::seed_demo_data;
use crate::backend::server::config::{load_database, ServerConfig, StartupError};
use crate::backend::server::state::AppState;

/// How often idle per-parent locks are dropped from the lock map
const LOCK_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Create and configure the Axum application
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, StartupError> {
    tracing::info!("Initializing taskboard backend server");

    let db_pool = load_database(config).await?;
    let app_state = AppState::new(db_pool, config);

    if config.seed_demo_data {
        match seed_demo_data(&app_state).await {
            Ok(summary) => tracing::info!(?summary, "Demo data seeded"),
            Err(e) => tracing::warn!("Skipping demo data: {}", e),
        }
    }

    let app = create_router(app_state.clone(), &config.static_dir);

    spawn_lock_cleanup(app_state.parent_locks());
    tracing::info!("Router configured with periodic lock cleanup task");

    Ok(app)
}

/// Periodically drop per-parent mutexes that nobody holds
fn spawn_lock_cleanup(locks: ParentLocks) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LOCK_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = locks.cleanup_idle();
            tracing::debug!(removed, tracked = locks.tracked(), "Cleaned up idle parent locks");
        }
    });
}
