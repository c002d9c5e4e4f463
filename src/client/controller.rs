/**
 * Board Controller
 *
 * Wires user intents (add/edit/delete/move) into state store mutations
 * and triggers publication. Each intent:
 *
 * 1. builds a typed mutation (generating ids and timestamps here, so
 *    application stays deterministic),
 * 2. applies it optimistically and synchronously to the local snapshot,
 * 3. publishes the entire new snapshot, fire-and-forget.
 *
 * A mutation that applies as a no-op publishes nothing. Remote snapshots
 * arriving over the subscription replace local state wholesale; there is
 * no coordination between clients beyond the store itself.
 */
use std::sync::{Arc, Mutex, RwLock};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::client::presence::PresenceRegistry;
use crate::client::state::{BoardStateStore, SnapshotEvent};
use crate::client::sync::{SyncClient, SyncStatus};
use crate::shared::board::{get_timestamp, Board, Column, Task};
use crate::shared::mutation::BoardMutation;
use crate::store::MemoryStore;

/// Orchestrates one client's board: state, replication and presence
pub struct BoardController {
    state: Arc<RwLock<BoardStateStore>>,
    sync: SyncClient,
    presence: PresenceRegistry,
    subscription: Mutex<Option<JoinHandle<()>>>,
}

impl BoardController {
    /// Create a controller for one client session against a store
    pub fn new(store: &MemoryStore) -> Self {
        Self {
            state: Arc::new(RwLock::new(BoardStateStore::new())),
            sync: SyncClient::new(store.clone()),
            presence: PresenceRegistry::new(store),
            subscription: Mutex::new(None),
        }
    }

    /// Go live: register presence, load the current document and start
    /// adopting remote snapshots
    ///
    /// Subscribes before the initial read so a write landing in between
    /// is not missed; adopting the same snapshot twice is harmless.
    pub async fn attach(&self) {
        self.presence.activate().await;

        let mut updates = self.sync.subscribe();
        let initial = self.sync.current_board();
        self.state.write().unwrap().replace(initial);

        let state = self.state.clone();
        let handle = tokio::spawn(async move {
            loop {
                match updates.recv().await {
                    Ok(document) => {
                        let board = SyncClient::decode(Some(&document));
                        state.write().unwrap().replace(board);
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Fine to lose intermediate snapshots: the next
                        // event carries the full document anyway.
                        tracing::warn!("[Controller] Subscription lagged, skipped {skipped}");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::debug!("[Controller] Store channel closed, stopping");
                        break;
                    }
                }
            }
        });
        *self.subscription.lock().unwrap() = Some(handle);
    }

    /// Tear down: deregister presence and stop the subscription
    pub fn detach(&self) {
        self.presence.deactivate();
        if let Some(handle) = self.subscription.lock().unwrap().take() {
            handle.abort();
        }
    }

    /// Clone the current canonical snapshot
    pub fn board(&self) -> Option<Board> {
        self.state.read().unwrap().snapshot()
    }

    /// Subscribe to canonical snapshot changes
    pub fn subscribe_snapshots(&self) -> broadcast::Receiver<SnapshotEvent> {
        self.state.read().unwrap().subscribe()
    }

    /// Number of currently connected sessions (this one included once
    /// attached)
    pub fn online_count(&self) -> usize {
        self.presence.online_count()
    }

    /// This session's opaque id
    pub fn session_id(&self) -> &str {
        self.presence.session_id()
    }

    /// The presence registry for this session
    pub fn presence(&self) -> &PresenceRegistry {
        &self.presence
    }

    /// Replication health of the last publication
    pub fn sync_status(&self) -> SyncStatus {
        self.sync.status()
    }

    /// Install an empty board document if the store has none yet
    ///
    /// A fresh deployment starts with no `boardData`; every client shows
    /// "no data" until someone seeds it.
    pub fn create_board(&self) {
        if self.board().is_some() {
            return;
        }
        let board = Board::new();
        self.state.write().unwrap().replace(Some(board.clone()));
        self.sync.publish(&board);
    }

    /// Add a task to the end of a column; returns the new task id
    pub fn add_task(&self, column_id: &str, title: &str) -> Option<String> {
        let task = Task::new(title);
        let task_id = task.id.clone();
        let applied = self.mutate(BoardMutation::AddTask {
            column_id: column_id.to_string(),
            task,
        });
        applied.then_some(task_id)
    }

    /// Edit a task's title and/or description
    pub fn edit_task(&self, task_id: &str, title: Option<&str>, description: Option<&str>) {
        self.mutate(BoardMutation::EditTask {
            task_id: task_id.to_string(),
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            updated_at: get_timestamp(),
        });
    }

    /// Delete a task
    pub fn delete_task(&self, task_id: &str) {
        self.mutate(BoardMutation::DeleteTask {
            task_id: task_id.to_string(),
        });
    }

    /// Drop a task onto a target (column id or task id)
    pub fn move_task(&self, task_id: &str, target_id: &str) {
        self.mutate(BoardMutation::MoveTask {
            task_id: task_id.to_string(),
            target_id: target_id.to_string(),
        });
    }

    /// Add a column at the end of the board; returns the new column id
    pub fn add_column(&self, title: &str) -> Option<String> {
        let column = Column::new(title);
        let column_id = column.id.clone();
        let applied = self.mutate(BoardMutation::AddColumn { column });
        applied.then_some(column_id)
    }

    /// Rename a column
    pub fn rename_column(&self, column_id: &str, title: &str) {
        self.mutate(BoardMutation::RenameColumn {
            column_id: column_id.to_string(),
            title: title.to_string(),
        });
    }

    /// Delete a column and every task it contains
    pub fn delete_column(&self, column_id: &str) {
        self.mutate(BoardMutation::DeleteColumn {
            column_id: column_id.to_string(),
        });
    }

    /// Relocate a column to another column's position
    pub fn move_column(&self, column_id: &str, target_column_id: &str) {
        self.mutate(BoardMutation::MoveColumn {
            column_id: column_id.to_string(),
            target_column_id: target_column_id.to_string(),
        });
    }

    /// Apply optimistically, then publish the whole snapshot on change
    fn mutate(&self, mutation: BoardMutation) -> bool {
        let (applied, snapshot) = {
            let mut state = self.state.write().unwrap();
            match state.apply(&mutation) {
                Ok(applied) => (applied, state.snapshot()),
                Err(e) => {
                    tracing::error!("[Controller] Rejected mutation: {}", e);
                    return false;
                }
            }
        };
        if !applied {
            tracing::debug!("[Controller] Mutation was a no-op, nothing to publish");
            return false;
        }
        if let Some(board) = snapshot {
            self.sync.publish(&board);
        }
        true
    }
}

impl Drop for BoardController {
    fn drop(&mut self) {
        if let Some(handle) = self.subscription.lock().unwrap().take() {
            handle.abort();
        }
    }
}
