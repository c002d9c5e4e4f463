/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Routes
 *
 * - `GET /board` - Board document snapshot or subscription stream
 * - `PUT /board` - Atomic full-document overwrite
 * - `GET /presence` - Online count or count stream
 * - `PUT /presence/{session}` - Register a session marker
 * - `DELETE /presence/{session}` - Erase a session marker
 */
use axum::routing::{get, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::backend::handlers::{
    handle_board_get, handle_board_put, handle_presence_get, handle_presence_register,
    handle_presence_remove,
};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    Router::new()
        .route("/board", get(handle_board_get).put(handle_board_put))
        .route("/presence", get(handle_presence_get))
        .route(
            "/presence/{session}",
            put(handle_presence_register).delete(handle_presence_remove),
        )
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}
