/**
 * Router Configuration
 *
 * Combines the API routes with request tracing, CORS and the static SPA
 * fallback into the application router.
 */

use std::path::Path;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// * `/api/...` - JSON API
/// * anything else - files from `static_dir`, or its `index.html`
pub fn create_router(app_state: AppState, static_dir: &Path) -> Router<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .nest("/api", configure_api_routes(app_state.clone()))
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
