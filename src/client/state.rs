/**
 * Board State Store
 *
 * Owns the one canonical board snapshot on a client. All mutation logic
 * is pure ([`BoardMutation::apply`]); this store adds exactly three
 * things: the current snapshot, atomic replacement, and change
 * notification to observers.
 *
 * Replacement is atomic from the caller's perspective - observers see
 * either the previous snapshot or the next one, never an intermediate
 * state. A mutation that would violate the board invariants is rejected
 * and the previous snapshot stays canonical; a mutation referencing
 * missing ids applies as a no-op and is reported as such so the caller
 * can skip publishing.
 */
use tokio::sync::broadcast;

use crate::shared::board::Board;
use crate::shared::error::BoardError;
use crate::shared::mutation::BoardMutation;

/// Snapshot change event: the new canonical snapshot (`None` = no data)
pub type SnapshotEvent = Option<Board>;

/// Holds the canonical board snapshot and applies validated mutations
pub struct BoardStateStore {
    board: Option<Board>,
    snapshot_tx: broadcast::Sender<SnapshotEvent>,
}

impl BoardStateStore {
    /// Create an empty state store (no board loaded yet)
    pub fn new() -> Self {
        let (snapshot_tx, _) = broadcast::channel(64);
        Self {
            board: None,
            snapshot_tx,
        }
    }

    /// Borrow the current snapshot
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Clone the current snapshot
    pub fn snapshot(&self) -> Option<Board> {
        self.board.clone()
    }

    /// Subscribe to snapshot changes
    pub fn subscribe(&self) -> broadcast::Receiver<SnapshotEvent> {
        self.snapshot_tx.subscribe()
    }

    /// Apply a mutation to the canonical snapshot
    ///
    /// Returns `Ok(true)` when the snapshot changed, `Ok(false)` for a
    /// no-op (no board loaded, or referenced ids absent). The caller only
    /// publishes on `Ok(true)`.
    ///
    /// # Errors
    ///
    /// Returns the validation error and keeps the previous snapshot if the
    /// resulting board would violate an invariant. With mutations built by
    /// the controller this does not happen; the check guards the
    /// invariants against any other producer.
    pub fn apply(&mut self, mutation: &BoardMutation) -> Result<bool, BoardError> {
        let Some(board) = self.board.as_ref() else {
            tracing::debug!("[State] Mutation before any board loaded, ignoring");
            return Ok(false);
        };

        let next = mutation.apply(board);
        if next == *board {
            return Ok(false);
        }
        next.validate()?;

        self.board = Some(next);
        self.notify();
        Ok(true)
    }

    /// Adopt a snapshot wholesale (remote update or initial load)
    pub fn replace(&mut self, snapshot: Option<Board>) {
        self.board = snapshot;
        self.notify();
    }

    fn notify(&self) {
        // No observers is fine.
        let _ = self.snapshot_tx.send(self.board.clone());
    }
}

impl Default for BoardStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::board::{Column, Task};

    #[test]
    fn test_apply_before_load_is_noop() {
        let mut store = BoardStateStore::new();
        let applied = store
            .apply(&BoardMutation::AddColumn {
                column: Column::new("To do"),
            })
            .unwrap();
        assert!(!applied);
        assert!(store.board().is_none());
    }

    #[test]
    fn test_apply_changes_snapshot() {
        let mut store = BoardStateStore::new();
        store.replace(Some(Board::new()));
        let applied = store
            .apply(&BoardMutation::AddColumn {
                column: Column::new("To do"),
            })
            .unwrap();
        assert!(applied);
        assert_eq!(store.board().unwrap().column_order.len(), 1);
    }

    #[test]
    fn test_noop_mutation_reports_unchanged() {
        let mut store = BoardStateStore::new();
        store.replace(Some(Board::new()));
        let applied = store
            .apply(&BoardMutation::DeleteColumn {
                column_id: "ghost".to_string(),
            })
            .unwrap();
        assert!(!applied);
    }

    #[tokio::test]
    async fn test_observers_receive_new_snapshot() {
        let mut store = BoardStateStore::new();
        let mut rx = store.subscribe();
        store.replace(Some(Board::new()));
        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot, Some(Board::new()));
    }

    #[test]
    fn test_invalid_result_is_rejected() {
        // An AddTask mutation whose task id already sits in another column
        // would break the at-most-one-column invariant if applied blindly.
        let mut store = BoardStateStore::new();
        let mut board = Board::new();
        let column_a = Column::new("A");
        let column_b = Column::new("B");
        let task = Task::new("Shared");
        let mut col_a = column_a.clone();
        col_a.task_ids.push(task.id.clone());
        board.column_order = vec![column_a.id.clone(), column_b.id.clone()];
        board.tasks.insert(task.id.clone(), task.clone());
        board.columns.insert(column_a.id.clone(), col_a);
        board.columns.insert(column_b.id.clone(), column_b.clone());
        store.replace(Some(board.clone()));

        // Same id, different column: apply() refuses to adopt the result.
        let mut duplicate = task.clone();
        duplicate.title = "Copy".to_string();
        let result = store.apply(&BoardMutation::AddTask {
            column_id: column_b.id.clone(),
            task: duplicate,
        });
        assert!(matches!(result, Ok(false)) || result.is_err());
        assert_eq!(store.board(), Some(&board));
    }
}
