/**
 * In-Process Replicated Store
 *
 * Holds the board document as raw JSON plus the ephemeral presence
 * markers, and fans out every accepted change to all subscribers over
 * broadcast channels. Writes are atomic whole-document swaps: last
 * writer wins, and a reader never observes a partially-applied state.
 *
 * The store deliberately does not validate documents. It replicates
 * whatever JSON the last writer published; deciding whether a document
 * is a well-formed board is the sync client's job.
 *
 * # Connection Lifecycle
 *
 * Each client session obtains a [`StoreConnection`]. The connection
 * carries the connected-status signal and the registered on-disconnect
 * cleanup actions. Cleanup runs exactly once, on either an explicit
 * [`StoreConnection::disconnect`] or when the handle is dropped, which
 * covers crashes, closed tabs and network loss: the store side owns the
 * cleanup, not the client process.
 */
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use tokio::sync::{broadcast, watch};

/// Document change event: the full document as published
pub type DocumentEvent = serde_json::Value;

/// Presence change event: the complete marker map after the change
pub type PresenceEvent = HashMap<String, bool>;

/// In-process replicated document store
///
/// Cheap to clone; all clones share the same documents and channels.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    /// The board document under `boardData`, raw JSON
    board: RwLock<Option<serde_json::Value>>,
    /// Presence markers under `presence/{sessionId}`
    presence: Mutex<HashMap<String, bool>>,
    /// Fan-out for board document changes
    board_tx: broadcast::Sender<DocumentEvent>,
    /// Fan-out for presence changes
    presence_tx: broadcast::Sender<PresenceEvent>,
}

impl MemoryStore {
    /// Create a new empty store with the default channel capacity
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Create a new empty store with an explicit fan-out channel capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (board_tx, _) = broadcast::channel(capacity);
        let (presence_tx, _) = broadcast::channel(capacity);
        Self {
            inner: Arc::new(StoreInner {
                board: RwLock::new(None),
                presence: Mutex::new(HashMap::new()),
                board_tx,
                presence_tx,
            }),
        }
    }

    /// Open a new connection to the store
    ///
    /// The returned handle reports connected status and owns the
    /// on-disconnect cleanup registrations for this session.
    pub fn connect(&self) -> StoreConnection {
        let (connected_tx, _) = watch::channel(true);
        StoreConnection {
            store: self.clone(),
            connected_tx,
            cleanups: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Read the current board document
    pub fn read_document(&self) -> Option<serde_json::Value> {
        self.inner.board.read().unwrap().clone()
    }

    /// Atomically overwrite the board document and notify all subscribers
    ///
    /// The entire document is replaced; whichever write lands last is the
    /// one every subscriber converges on.
    pub fn write_document(&self, document: serde_json::Value) {
        {
            let mut board = self.inner.board.write().unwrap();
            *board = Some(document.clone());
        }
        // No subscribers is fine; the write still sticks.
        if let Err(e) = self.inner.board_tx.send(document) {
            tracing::debug!("[Store] No subscribers to receive document: {:?}", e);
        }
    }

    /// Subscribe to board document changes
    pub fn subscribe_document(&self) -> broadcast::Receiver<DocumentEvent> {
        self.inner.board_tx.subscribe()
    }

    /// Write a presence marker for a session and notify subscribers
    pub fn set_presence(&self, session_id: &str) {
        let sessions = {
            let mut presence = self.inner.presence.lock().unwrap();
            presence.insert(session_id.to_string(), true);
            presence.clone()
        };
        self.notify_presence(sessions);
    }

    /// Erase a session's presence marker and notify subscribers
    ///
    /// Erasing a marker that is already gone is harmless; the disconnect
    /// hook may fire after an explicit removal.
    pub fn remove_presence(&self, session_id: &str) {
        let sessions = {
            let mut presence = self.inner.presence.lock().unwrap();
            if presence.remove(session_id).is_none() {
                return;
            }
            presence.clone()
        };
        self.notify_presence(sessions);
    }

    /// Current presence marker map
    pub fn presence_sessions(&self) -> HashMap<String, bool> {
        self.inner.presence.lock().unwrap().clone()
    }

    /// Number of currently-present session markers
    pub fn online_count(&self) -> usize {
        self.inner.presence.lock().unwrap().len()
    }

    /// Subscribe to presence changes
    pub fn subscribe_presence(&self) -> broadcast::Receiver<PresenceEvent> {
        self.inner.presence_tx.subscribe()
    }

    fn notify_presence(&self, sessions: HashMap<String, bool>) {
        if let Err(e) = self.inner.presence_tx.send(sessions) {
            tracing::debug!("[Store] No subscribers to receive presence: {:?}", e);
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Store-side cleanup action bound to a connection
enum DisconnectAction {
    /// Erase `presence/{sessionId}` when the connection drops
    RemovePresence(String),
}

/// A client session's connection to the store
///
/// Dropping the handle without an explicit [`StoreConnection::disconnect`]
/// still runs the registered cleanup actions - the store treats a
/// vanished connection the same as a torn one.
pub struct StoreConnection {
    store: MemoryStore,
    connected_tx: watch::Sender<bool>,
    cleanups: Mutex<Vec<DisconnectAction>>,
    closed: AtomicBool,
}

impl StoreConnection {
    /// Watch the connection status signal
    ///
    /// Reports `true` while the connection is established. Presence
    /// registration waits on this before writing its marker.
    pub fn connected(&self) -> watch::Receiver<bool> {
        self.connected_tx.subscribe()
    }

    /// Register store-side removal of a presence marker on disconnect
    pub fn on_disconnect_remove_presence(&self, session_id: &str) {
        self.cleanups
            .lock()
            .unwrap()
            .push(DisconnectAction::RemovePresence(session_id.to_string()));
    }

    /// Cancel a previously registered presence cleanup
    ///
    /// Used on explicit deactivation, after the client has erased its own
    /// marker, so the hook does not fire redundantly later.
    pub fn cancel_on_disconnect(&self, session_id: &str) {
        self.cleanups.lock().unwrap().retain(
            |action| !matches!(action, DisconnectAction::RemovePresence(id) if id.as_str() == session_id),
        );
    }

    /// Tear the connection and run all registered cleanup actions
    ///
    /// Idempotent: cleanup runs at most once per connection. Tests use
    /// this to simulate an ungraceful connection loss.
    pub fn disconnect(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let _ = self.connected_tx.send(false);
        let actions = std::mem::take(&mut *self.cleanups.lock().unwrap());
        for action in actions {
            match action {
                DisconnectAction::RemovePresence(session_id) => {
                    tracing::debug!("[Store] Disconnect cleanup: removing presence/{session_id}");
                    self.store.remove_presence(&session_id);
                }
            }
        }
    }
}

impl Drop for StoreConnection {
    fn drop(&mut self) {
        self.disconnect();
    }
}
