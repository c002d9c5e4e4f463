/**
 * Typed Board Mutations
 *
 * This module defines the command objects the controller feeds into the
 * state store, and the pure application function that turns a snapshot
 * plus a mutation into the next snapshot.
 *
 * Application is total: a mutation whose referenced ids are absent
 * returns the board unchanged (a no-op, not an error). Ids and
 * timestamps are generated by the controller and carried inside the
 * mutation, so applying the same mutation to the same snapshot always
 * produces the same result.
 */
use serde::{Deserialize, Serialize};

use crate::shared::board::{Board, Column, Task};
use crate::shared::reorder;

/// A described change applied to a snapshot to produce the next snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BoardMutation {
    /// Add a freshly created task to the end of a column
    AddTask {
        /// Destination column id
        column_id: String,
        /// The new task, id and timestamps already assigned
        task: Task,
    },
    /// Edit a task's title and/or description in place
    EditTask {
        /// Target task id
        task_id: String,
        /// New title, when changing it
        title: Option<String>,
        /// New description, when changing it
        description: Option<String>,
        /// Refreshed `updated_at` timestamp
        updated_at: String,
    },
    /// Delete a task and remove it from its column
    DeleteTask {
        /// Target task id
        task_id: String,
    },
    /// Move a task onto a target (column id or task id)
    MoveTask {
        /// Dragged task id
        task_id: String,
        /// Drop target: a column id (append) or a task id (that position)
        target_id: String,
    },
    /// Add a freshly created column at the end of the board
    AddColumn {
        /// The new column, id already assigned
        column: Column,
    },
    /// Rename a column
    RenameColumn {
        /// Target column id
        column_id: String,
        /// New title
        title: String,
    },
    /// Delete a column and every task it contains
    DeleteColumn {
        /// Target column id
        column_id: String,
    },
    /// Relocate a column within the column order
    MoveColumn {
        /// Dragged column id
        column_id: String,
        /// Column whose index the dragged column takes
        target_column_id: String,
    },
}

impl BoardMutation {
    /// Apply this mutation to a snapshot, producing the next snapshot
    ///
    /// Pure and total: the input board is never modified, and a mutation
    /// referencing ids that are not present returns a clone of the input
    /// unchanged.
    pub fn apply(&self, board: &Board) -> Board {
        match self {
            Self::AddTask { column_id, task } => {
                if !board.columns.contains_key(column_id) || board.tasks.contains_key(&task.id) {
                    return board.clone();
                }
                let mut next = board.clone();
                if let Some(column) = next.columns.get_mut(column_id) {
                    column.task_ids.push(task.id.clone());
                }
                next.tasks.insert(task.id.clone(), task.clone());
                next
            }
            Self::EditTask {
                task_id,
                title,
                description,
                updated_at,
            } => {
                let mut next = board.clone();
                let Some(task) = next.tasks.get_mut(task_id) else {
                    return board.clone();
                };
                if let Some(title) = title {
                    task.title = title.clone();
                }
                if let Some(description) = description {
                    task.description = description.clone();
                }
                task.updated_at = updated_at.clone();
                next
            }
            Self::DeleteTask { task_id } => {
                let mut next = board.clone();
                if next.tasks.remove(task_id).is_none() {
                    return board.clone();
                }
                for column in next.columns.values_mut() {
                    column.task_ids.retain(|id| id != task_id);
                }
                next
            }
            Self::MoveTask { task_id, target_id } => {
                reorder::move_task(board, task_id, target_id).unwrap_or_else(|| board.clone())
            }
            Self::AddColumn { column } => {
                if board.columns.contains_key(&column.id) {
                    return board.clone();
                }
                let mut next = board.clone();
                next.column_order.push(column.id.clone());
                next.columns.insert(column.id.clone(), column.clone());
                next
            }
            Self::RenameColumn { column_id, title } => {
                let mut next = board.clone();
                let Some(column) = next.columns.get_mut(column_id) else {
                    return board.clone();
                };
                column.title = title.clone();
                next
            }
            Self::DeleteColumn { column_id } => {
                let mut next = board.clone();
                let Some(column) = next.columns.remove(column_id) else {
                    return board.clone();
                };
                // Cascade: member tasks die with the column.
                for task_id in &column.task_ids {
                    next.tasks.remove(task_id);
                }
                next.column_order.retain(|id| id != column_id);
                next
            }
            Self::MoveColumn {
                column_id,
                target_column_id,
            } => reorder::move_column(board, column_id, target_column_id)
                .unwrap_or_else(|| board.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::board::get_timestamp;
    use pretty_assertions::assert_eq;

    fn board_with_column() -> (Board, String) {
        let column = Column::new("To do");
        let column_id = column.id.clone();
        let board = BoardMutation::AddColumn { column }.apply(&Board::new());
        (board, column_id)
    }

    #[test]
    fn test_add_task() {
        let (board, column_id) = board_with_column();
        let task = Task::new("Ship it");
        let task_id = task.id.clone();
        let next = BoardMutation::AddTask {
            column_id: column_id.clone(),
            task,
        }
        .apply(&board);

        assert_eq!(next.columns[&column_id].task_ids, vec![task_id.clone()]);
        assert!(next.tasks.contains_key(&task_id));
        assert!(next.validate().is_ok());
    }

    #[test]
    fn test_add_task_to_missing_column_is_noop() {
        let (board, _) = board_with_column();
        let next = BoardMutation::AddTask {
            column_id: "ghost".to_string(),
            task: Task::new("Lost"),
        }
        .apply(&board);
        assert_eq!(next, board);
    }

    #[test]
    fn test_edit_task_refreshes_updated_at() {
        let (board, column_id) = board_with_column();
        let task = Task::new("Draft");
        let task_id = task.id.clone();
        let board = BoardMutation::AddTask { column_id, task }.apply(&board);

        let next = BoardMutation::EditTask {
            task_id: task_id.clone(),
            title: Some("Final".to_string()),
            description: None,
            updated_at: "2030-01-01T00:00:00+00:00".to_string(),
        }
        .apply(&board);

        let task = &next.tasks[&task_id];
        assert_eq!(task.title, "Final");
        assert_eq!(task.description, "");
        assert_eq!(task.updated_at, "2030-01-01T00:00:00+00:00");
        assert_eq!(task.created_at, board.tasks[&task_id].created_at);
    }

    #[test]
    fn test_edit_missing_task_is_noop() {
        let (board, _) = board_with_column();
        let next = BoardMutation::EditTask {
            task_id: "ghost".to_string(),
            title: Some("Nope".to_string()),
            description: None,
            updated_at: get_timestamp(),
        }
        .apply(&board);
        assert_eq!(next, board);
    }

    #[test]
    fn test_delete_task() {
        let (board, column_id) = board_with_column();
        let task = Task::new("Temp");
        let task_id = task.id.clone();
        let board = BoardMutation::AddTask {
            column_id: column_id.clone(),
            task,
        }
        .apply(&board);

        let next = BoardMutation::DeleteTask {
            task_id: task_id.clone(),
        }
        .apply(&board);

        assert!(!next.tasks.contains_key(&task_id));
        assert!(next.columns[&column_id].task_ids.is_empty());
        assert!(next.validate().is_ok());
    }

    #[test]
    fn test_delete_missing_task_is_noop() {
        let (board, _) = board_with_column();
        let next = BoardMutation::DeleteTask {
            task_id: "ghost".to_string(),
        }
        .apply(&board);
        assert_eq!(next, board);
    }

    #[test]
    fn test_delete_column_cascades() {
        let (board, column_id) = board_with_column();
        let keep = Column::new("Keep");
        let keep_id = keep.id.clone();
        let board = BoardMutation::AddColumn { column: keep }.apply(&board);

        let doomed = Task::new("Doomed");
        let doomed_id = doomed.id.clone();
        let board = BoardMutation::AddTask {
            column_id: column_id.clone(),
            task: doomed,
        }
        .apply(&board);
        let survivor = Task::new("Survivor");
        let survivor_id = survivor.id.clone();
        let board = BoardMutation::AddTask {
            column_id: keep_id.clone(),
            task: survivor,
        }
        .apply(&board);

        let next = BoardMutation::DeleteColumn {
            column_id: column_id.clone(),
        }
        .apply(&board);

        assert!(!next.columns.contains_key(&column_id));
        assert!(!next.column_order.contains(&column_id));
        assert!(!next.tasks.contains_key(&doomed_id));
        assert!(next.tasks.contains_key(&survivor_id));
        assert_eq!(next.columns[&keep_id], board.columns[&keep_id]);
        assert!(next.validate().is_ok());
    }

    #[test]
    fn test_rename_column() {
        let (board, column_id) = board_with_column();
        let next = BoardMutation::RenameColumn {
            column_id: column_id.clone(),
            title: "Doing".to_string(),
        }
        .apply(&board);
        assert_eq!(next.columns[&column_id].title, "Doing");
    }

    #[test]
    fn test_add_existing_column_is_noop() {
        let (board, column_id) = board_with_column();
        let mut duplicate = Column::new("Copy");
        duplicate.id = column_id;
        let next = BoardMutation::AddColumn { column: duplicate }.apply(&board);
        assert_eq!(next, board);
    }

    #[test]
    fn test_move_with_unknown_target_is_noop() {
        let (board, column_id) = board_with_column();
        let task = Task::new("Stay");
        let task_id = task.id.clone();
        let board = BoardMutation::AddTask { column_id, task }.apply(&board);

        let next = BoardMutation::MoveTask {
            task_id,
            target_id: "ghost".to_string(),
        }
        .apply(&board);
        assert_eq!(next, board);
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let (board, column_id) = board_with_column();
        let before = board.clone();
        let _ = BoardMutation::AddTask {
            column_id,
            task: Task::new("New"),
        }
        .apply(&board);
        assert_eq!(board, before);
    }
}
