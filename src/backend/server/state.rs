/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` trait for Axum state extraction.
 *
 * The state is deliberately thin: the replicated store owns every
 * document and channel, and it is already cheap to clone and thread-safe.
 * Handlers extract the store directly and talk to it the way an
 * in-process client would.
 */
use axum::extract::FromRef;

use crate::shared::config::AppConfig;
use crate::store::MemoryStore;

/// Application state for the store server
#[derive(Clone)]
pub struct AppState {
    /// The replicated store every endpoint reads from and writes to
    pub store: MemoryStore,
}

impl AppState {
    /// Create application state around a fresh store
    pub fn new(config: AppConfig) -> Self {
        Self {
            store: MemoryStore::with_capacity(config.channel_capacity),
        }
    }
}

/// Allow handlers to extract the store without the whole `AppState`
impl FromRef<AppState> for MemoryStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}
