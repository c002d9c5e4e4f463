/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server: configuration, store creation, and route assembly.
 */
use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::state::AppState;
use crate::shared::config::AppConfig;

/// Create and configure the Axum application
///
/// Builds the replicated store, the application state and the router.
/// The store starts empty; the first client publication seeds the board
/// document.
pub async fn create_app() -> Router<()> {
    let config = AppConfig::from_env();
    tracing::info!(
        "[Server] Initializing XFBoard store server (channel capacity {})",
        config.channel_capacity
    );

    let app_state = AppState::new(config);
    create_router(app_state)
}
