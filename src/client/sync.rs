/**
 * Sync Client
 *
 * Replicates the board document between the local state store and the
 * replicated store.
 *
 * # Incoming
 *
 * Every incoming document is validated before acceptance: it must
 * deserialize into the board shape (required maps and list present,
 * correctly typed) and satisfy the board invariants. A malformed or
 * missing document yields an explicit "no data" state (`None`) rather
 * than raising a fault.
 *
 * # Outgoing
 *
 * After every accepted local mutation the *entire* current snapshot is
 * published as a full overwrite - there is no merge step and no partial
 * patch. Whichever full write lands last at the store wins in full.
 * Publication is fire-and-forget: the caller never blocks on it and a
 * failure does not roll back the optimistic local state; it is logged
 * and surfaced through [`SyncStatus::Degraded`].
 */
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use crate::shared::board::Board;
use crate::store::{DocumentEvent, MemoryStore};

/// Replication health as seen by this client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Nothing published yet
    Idle,
    /// Last publication was accepted by the store
    Synced,
    /// Last publication failed; local state is ahead of the store
    Degraded,
}

/// Subscribes to and publishes the canonical board document
pub struct SyncClient {
    store: MemoryStore,
    status: Arc<Mutex<SyncStatus>>,
}

impl SyncClient {
    /// Create a sync client against a store
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store,
            status: Arc::new(Mutex::new(SyncStatus::Idle)),
        }
    }

    /// Decode and validate a store document
    ///
    /// Returns `None` for a missing document, a document that does not
    /// have the board shape, or a board violating the invariants. No
    /// fault is raised in any of these cases.
    pub fn decode(document: Option<&serde_json::Value>) -> Option<Board> {
        let document = document?;
        let board: Board = match serde_json::from_value(document.clone()) {
            Ok(board) => board,
            Err(e) => {
                tracing::warn!("[Sync] Ignoring malformed board document: {}", e);
                return None;
            }
        };
        if let Err(e) = board.validate() {
            tracing::warn!("[Sync] Ignoring inconsistent board document: {}", e);
            return None;
        }
        Some(board)
    }

    /// Read and decode the store's current document
    pub fn current_board(&self) -> Option<Board> {
        Self::decode(self.store.read_document().as_ref())
    }

    /// Subscribe to document change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<DocumentEvent> {
        self.store.subscribe_document()
    }

    /// Publish the full snapshot to the store, fire-and-forget
    ///
    /// Serialization failure marks the client degraded and keeps the
    /// optimistic local state; there is no retry and no rollback.
    pub fn publish(&self, board: &Board) {
        match serde_json::to_value(board) {
            Ok(document) => {
                self.store.write_document(document);
                self.set_status(SyncStatus::Synced);
                tracing::debug!("[Sync] Published full snapshot");
            }
            Err(e) => {
                tracing::error!("[Sync] Failed to serialize snapshot: {}", e);
                self.set_status(SyncStatus::Degraded);
            }
        }
    }

    /// Current replication health
    pub fn status(&self) -> SyncStatus {
        *self.status.lock().unwrap()
    }

    fn set_status(&self, status: SyncStatus) {
        *self.status.lock().unwrap() = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_missing_document() {
        assert!(SyncClient::decode(None).is_none());
    }

    #[test]
    fn test_decode_wrong_shape() {
        let document = json!({"columns": {}, "tasks": {}});
        assert!(SyncClient::decode(Some(&document)).is_none());

        let document = json!({"columns": [], "tasks": {}, "columnOrder": []});
        assert!(SyncClient::decode(Some(&document)).is_none());

        let document = json!("not an object");
        assert!(SyncClient::decode(Some(&document)).is_none());
    }

    #[test]
    fn test_decode_invariant_violation() {
        // columnOrder references a column that does not exist
        let document = json!({
            "columns": {},
            "tasks": {},
            "columnOrder": ["ghost"],
        });
        assert!(SyncClient::decode(Some(&document)).is_none());
    }

    #[test]
    fn test_decode_valid_document() {
        let document = json!({
            "columns": {
                "a": {"id": "a", "title": "To do", "taskIds": ["t1"]},
            },
            "tasks": {
                "t1": {
                    "id": "t1",
                    "title": "Task",
                    "createdAt": "2024-01-01T00:00:00Z",
                    "updatedAt": "2024-01-01T00:00:00Z",
                },
            },
            "columnOrder": ["a"],
        });
        let board = SyncClient::decode(Some(&document)).unwrap();
        assert_eq!(board.column_order, ["a"]);
        assert_eq!(board.tasks["t1"].description, "");
    }

    #[tokio::test]
    async fn test_publish_and_read_back() {
        let store = MemoryStore::new();
        let sync = SyncClient::new(store.clone());
        assert_eq!(sync.status(), SyncStatus::Idle);

        sync.publish(&Board::new());
        assert_eq!(sync.status(), SyncStatus::Synced);
        assert_eq!(sync.current_board(), Some(Board::new()));
    }

    #[tokio::test]
    async fn test_last_writer_wins_in_full() {
        let store = MemoryStore::new();
        let client_a = SyncClient::new(store.clone());
        let client_b = SyncClient::new(store.clone());

        let mut board_a = Board::new();
        board_a.column_order = vec![];
        let board_b = {
            let mut board = Board::new();
            let column = crate::shared::board::Column::new("B wins");
            board.column_order.push(column.id.clone());
            board.columns.insert(column.id.clone(), column);
            board
        };

        client_a.publish(&board_a);
        client_b.publish(&board_b);

        // The store holds exactly the later full snapshot, never a mixture.
        assert_eq!(client_a.current_board(), Some(board_b.clone()));
        assert_eq!(client_b.current_board(), Some(board_b));
    }
}
