//! Common test utilities and fixtures
//!
//! Builders for boards with known ids, used across the integration
//! tests. Fixture ids are deliberately short and stable (`a`, `t1`) so
//! expected orderings read at a glance.
#![allow(dead_code)]

use xfboard::shared::board::{Board, Column, Task};

/// A task with a fixed id and timestamps
pub fn task(id: &str) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Task {id}"),
        description: String::new(),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

/// A column with a fixed id and member task ids
pub fn column(id: &str, task_ids: &[&str]) -> Column {
    Column {
        id: id.to_string(),
        title: format!("Column {id}"),
        task_ids: task_ids.iter().map(|s| s.to_string()).collect(),
    }
}

/// Assemble a board from columns; tasks are derived from the memberships
pub fn board(columns: Vec<Column>) -> Board {
    let mut board = Board::new();
    for column in columns {
        for task_id in &column.task_ids {
            board.tasks.insert(task_id.clone(), task(task_id));
        }
        board.column_order.push(column.id.clone());
        board.columns.insert(column.id.clone(), column);
    }
    board
}

/// The reference fixture: a=[t1,t2,t3], b=[t4,t5], c=[]
pub fn sample_board() -> Board {
    board(vec![
        column("a", &["t1", "t2", "t3"]),
        column("b", &["t4", "t5"]),
        column("c", &[]),
    ])
}

/// Task ids of one column, as owned strings for easy comparison
pub fn task_ids(board: &Board, column_id: &str) -> Vec<String> {
    board.columns[column_id].task_ids.clone()
}
