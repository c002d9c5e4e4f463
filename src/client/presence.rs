/**
 * Presence Registry
 *
 * Tracks which client sessions are currently connected. Each client
 * session writes a single ephemeral marker under `presence/{sessionId}`
 * and registers a store-side cleanup that erases the marker if the
 * connection is lost without explicit client action - crashes, closed
 * tabs and network loss all self-heal without any cooperation from the
 * remaining clients.
 *
 * The registry never persists anything beyond its own session's marker;
 * the online count is derived from whatever markers the store currently
 * holds.
 */
use tokio::sync::broadcast;

use crate::shared::board::new_id;
use crate::store::{MemoryStore, PresenceEvent, StoreConnection};

/// Tracks this session's presence marker and the derived online count
pub struct PresenceRegistry {
    session_id: String,
    store: MemoryStore,
    connection: StoreConnection,
}

impl PresenceRegistry {
    /// Create a registry with a fresh opaque session id
    pub fn new(store: &MemoryStore) -> Self {
        Self {
            session_id: new_id(),
            store: store.clone(),
            connection: store.connect(),
        }
    }

    /// This session's opaque id
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The connection this session's lifecycle cleanup is bound to
    pub fn connection(&self) -> &StoreConnection {
        &self.connection
    }

    /// Register this session as present
    ///
    /// Waits for the connection-status signal, writes the `connected`
    /// marker, then registers the store-side cleanup bound to this
    /// session's connection. Registration order matters: the marker must
    /// exist before a disconnect could try to erase it.
    pub async fn activate(&self) {
        let mut connected = self.connection.connected();
        while !*connected.borrow() {
            if connected.changed().await.is_err() {
                tracing::warn!("[Presence] Connection closed before activation");
                return;
            }
        }

        self.store.set_presence(&self.session_id);
        self.connection
            .on_disconnect_remove_presence(&self.session_id);
        tracing::debug!("[Presence] Session {} registered", self.session_id);
    }

    /// Explicitly deregister this session
    ///
    /// Erases the marker and cancels the disconnect hook so it does not
    /// fire redundantly when the connection actually closes.
    pub fn deactivate(&self) {
        self.store.remove_presence(&self.session_id);
        self.connection.cancel_on_disconnect(&self.session_id);
        tracing::debug!("[Presence] Session {} deregistered", self.session_id);
    }

    /// Number of currently-present session markers
    pub fn online_count(&self) -> usize {
        self.store.online_count()
    }

    /// Subscribe to presence changes; the online count is the number of
    /// markers in each event
    pub fn subscribe(&self) -> broadcast::Receiver<PresenceEvent> {
        self.store.subscribe_presence()
    }
}
