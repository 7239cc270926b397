/**
 * API Routes
 *
 * Mounted under `/api` by the main router.
 *
 * ## Public
 * - `POST /auth/register`
 * - `POST /auth/login`
 *
 * ## Protected (bearer token)
 * - `GET /auth/me`
 * - `GET|POST /boards`
 * - `GET|PUT|DELETE /boards/{board_id}`
 * - `POST /boards/{board_id}/members`
 * - `DELETE /boards/{board_id}/members/{user_id}`
 * - `GET /boards/{board_id}/activity`
 * - `GET|POST /boards/{board_id}/lists`
 * - `GET /boards/{board_id}/lists/archived`
 * - `GET|PUT|DELETE /lists/{list_id}`
 * - `PUT /lists/{list_id}/move`
 * - `PUT /lists/{list_id}/archive`
 * - `GET|POST /lists/{list_id}/cards`
 * - `GET|PUT|DELETE /cards/{card_id}`
 * - `PUT /cards/{card_id}/move`
 * - `PUT /cards/{card_id}/labels`
 * - `PUT /cards/{card_id}/due-date`
 */

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{get_me, login, register};
use crate::backend::boards::handlers as boards;
use crate::backend::cards::handlers as cards;
use crate::backend::error::BackendError;
use crate::backend::lists::handlers as lists;
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Build the `/api` router
///
/// The auth middleware is attached with `route_layer`, so it only runs for
/// matched protected routes; unknown paths reach the JSON 404 fallback.
pub fn configure_api_routes(app_state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login));

    let protected = Router::new()
        .route("/auth/me", get(get_me))
        // Boards
        .route("/boards", get(boards::list_boards).post(boards::create_board))
        .route(
            "/boards/{board_id}",
            get(boards::get_board)
                .put(boards::update_board)
                .delete(boards::delete_board),
        )
        .route("/boards/{board_id}/members", post(boards::add_member))
        .route(
            "/boards/{board_id}/members/{user_id}",
            axum::routing::delete(boards::remove_member),
        )
        .route("/boards/{board_id}/activity", get(boards::get_activity))
        // Lists
        .route(
            "/boards/{board_id}/lists",
            get(lists::get_lists).post(lists::create_list),
        )
        .route("/boards/{board_id}/lists/archived", get(lists::get_archived_lists))
        .route(
            "/lists/{list_id}",
            get(lists::get_list)
                .put(lists::update_list)
                .delete(lists::delete_list),
        )
        .route("/lists/{list_id}/move", put(lists::move_list))
        .route("/lists/{list_id}/archive", put(lists::toggle_archive))
        // Cards
        .route(
            "/lists/{list_id}/cards",
            get(cards::get_cards).post(cards::create_card),
        )
        .route(
            "/cards/{card_id}",
            get(cards::get_card)
                .put(cards::update_card)
                .delete(cards::delete_card),
        )
        .route("/cards/{card_id}/move", put(cards::move_card))
        .route("/cards/{card_id}/labels", put(cards::update_labels))
        .route("/cards/{card_id}/due-date", put(cards::update_due_date))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware));

    public
        .merge(protected)
        .fallback(|| async { BackendError::not_found("Route not found") })
}
