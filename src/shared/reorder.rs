/**
 * Drag-and-Drop Reorder Engine
 *
 * This module computes the next valid ordering for drag events. Two
 * independent move kinds share the mechanism:
 *
 * - Task moves need two-sided index bookkeeping because task membership
 *   and position are split across two possibly-different columns.
 * - Column moves operate on one flat list, so a simpler relocation
 *   suffices.
 *
 * Both functions are pure: they take a board snapshot and return the next
 * snapshot, or `None` when the drop resolves to nothing (unknown ids,
 * dragged id equal to target id). Neither will ever duplicate or drop an
 * id.
 */
use std::collections::HashSet;

use crate::shared::board::Board;

/// Compute the board resulting from dropping a task onto a target
///
/// `target_id` is either a column id - meaning "drop into that column, at
/// the end" - or a task id - meaning "drop at that task's current
/// position". The dragged task lands exactly at the index the target task
/// occupied when the drag ended.
///
/// Returns `None` (no-op) when:
/// - `target_id` equals `dragged_task_id`
/// - no column contains `dragged_task_id`
/// - `target_id` resolves to neither a column nor a task
///
/// # Example
///
/// ```rust
/// use xfboard::shared::board::{Board, Column, Task};
/// use xfboard::shared::reorder::move_task;
///
/// let mut board = Board::new();
/// let mut todo = Column::new("To do");
/// for id in ["t1", "t2", "t3"] {
///     let mut task = Task::new(id);
///     task.id = id.to_string();
///     todo.task_ids.push(id.to_string());
///     board.tasks.insert(id.to_string(), task);
/// }
/// let todo_id = todo.id.clone();
/// board.column_order.push(todo_id.clone());
/// board.columns.insert(todo_id.clone(), todo);
///
/// let next = move_task(&board, "t1", "t3").unwrap();
/// assert_eq!(next.columns[&todo_id].task_ids, ["t2", "t3", "t1"]);
/// ```
pub fn move_task(board: &Board, dragged_task_id: &str, target_id: &str) -> Option<Board> {
    if dragged_task_id == target_id {
        return None;
    }

    let source_column_id = board.column_of(dragged_task_id)?.to_string();

    // Resolve the destination: a column id means append, a task id means
    // that task's current index within its column.
    let (destination_column_id, destination_index) = if board.columns.contains_key(target_id) {
        (target_id.to_string(), None)
    } else {
        let column_id = board.column_of(target_id)?.to_string();
        let index = board.columns[&column_id]
            .task_ids
            .iter()
            .position(|id| id == target_id)?;
        (column_id, Some(index))
    };

    let mut next = board.clone();

    // Remove the dragged id from its source list first. For a same-column
    // move this shifts later entries left, so inserting back at the
    // target's original index lands the dragged task exactly there.
    if let Some(source) = next.columns.get_mut(&source_column_id) {
        source.task_ids.retain(|id| id != dragged_task_id);
    }

    let destination = next.columns.get_mut(&destination_column_id)?;
    match destination_index {
        Some(index) => {
            let at = index.min(destination.task_ids.len());
            destination.task_ids.insert(at, dragged_task_id.to_string());
        }
        None => destination.task_ids.push(dragged_task_id.to_string()),
    }

    // Guard against any upstream inconsistency ever duplicating an id.
    dedupe_keep_first(&mut destination.task_ids);

    Some(next)
}

/// Compute the board resulting from dropping a column onto another column
///
/// The dragged id is relocated to the target's index in `column_order`;
/// all other ids keep their relative order. Both ids must be present in
/// `column_order`, otherwise the drop is a no-op.
pub fn move_column(board: &Board, dragged_column_id: &str, target_column_id: &str) -> Option<Board> {
    if dragged_column_id == target_column_id {
        return None;
    }

    let from = board
        .column_order
        .iter()
        .position(|id| id == dragged_column_id)?;
    let to = board
        .column_order
        .iter()
        .position(|id| id == target_column_id)?;

    let mut next = board.clone();
    let id = next.column_order.remove(from);
    next.column_order.insert(to, id);

    Some(next)
}

/// Drop repeated ids, keeping the first occurrence of each
fn dedupe_keep_first(ids: &mut Vec<String>) {
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}
