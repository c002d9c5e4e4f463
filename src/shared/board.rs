/**
 * Board Document Model
 *
 * This module defines the Board, Column and Task structures that make up
 * the replicated board document, along with the invariant checks every
 * accepted snapshot must satisfy.
 *
 * The document is shared between clients and the store server. It is
 * serialized to/from JSON with camelCase keys (`taskIds`, `columnOrder`,
 * `createdAt`), which is the layout the store holds under `boardData`.
 */
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::shared::error::BoardError;

/// Represents a single task card
///
/// Identity is the opaque `id` string; edits replace the task in place and
/// refresh `updated_at`.
///
/// # Fields
/// * `id` - Opaque unique identifier (UUID v4 string)
/// * `title` - Task title
/// * `description` - Free-form description, may be empty
/// * `created_at` - ISO 8601 timestamp (RFC3339)
/// * `updated_at` - ISO 8601 timestamp, refreshed on every field change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique identifier
    pub id: String,
    /// Task title
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// ISO 8601 timestamp (RFC3339 format)
    pub created_at: String,
    /// ISO 8601 timestamp, refreshed on every field change
    pub updated_at: String,
}

impl Task {
    /// Create a new task with a fresh id and the current timestamp
    pub fn new(title: impl Into<String>) -> Self {
        let now = get_timestamp();
        Self {
            id: new_id(),
            title: title.into(),
            description: String::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Represents a single board column
///
/// `task_ids` is the ordered sequence of member task ids; it must never
/// contain duplicates, and a task id must not appear in more than one
/// column (checked by [`Board::validate`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Opaque unique identifier
    pub id: String,
    /// Column title
    pub title: String,
    /// Ordered member task ids
    ///
    /// Defaults to empty when absent from the document; stores that prune
    /// empty subtrees drop the key entirely.
    #[serde(default)]
    pub task_ids: Vec<String>,
}

impl Column {
    /// Create a new empty column with a fresh id
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            task_ids: Vec::new(),
        }
    }
}

/// The canonical replicated board document
///
/// One complete value of this structure is a snapshot. Snapshots are
/// replaced wholesale, never patched: every accepted mutation produces a
/// new snapshot and every publication overwrites the full document.
///
/// `columns`, `tasks` and `column_order` are all required in the wire
/// document; a document missing any of them is treated as "no data" by the
/// sync client rather than an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Column id -> column
    pub columns: HashMap<String, Column>,
    /// Task id -> task
    pub tasks: HashMap<String, Task>,
    /// Ordered column ids
    pub column_order: Vec<String>,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the id of the column whose `task_ids` contains the given task
    pub fn column_of(&self, task_id: &str) -> Option<&str> {
        self.columns
            .values()
            .find(|column| column.task_ids.iter().any(|id| id == task_id))
            .map(|column| column.id.as_str())
    }

    /// Check the board invariants
    ///
    /// Every accepted snapshot must satisfy:
    ///
    /// 1. every id in `column_order` has a matching entry in `columns`
    /// 2. every id in any column's `task_ids` has a matching entry in `tasks`
    /// 3. each task id appears in at most one column, at most once
    /// 4. no duplicate ids within `column_order`
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError::Validation`] naming the offending field and id.
    pub fn validate(&self) -> Result<(), BoardError> {
        let mut seen_columns = HashSet::new();
        for column_id in &self.column_order {
            if !self.columns.contains_key(column_id) {
                return Err(BoardError::validation(
                    "columnOrder",
                    format!("unknown column id '{column_id}'"),
                ));
            }
            if !seen_columns.insert(column_id) {
                return Err(BoardError::validation(
                    "columnOrder",
                    format!("duplicate column id '{column_id}'"),
                ));
            }
        }

        let mut seen_tasks = HashSet::new();
        for column in self.columns.values() {
            for task_id in &column.task_ids {
                if !self.tasks.contains_key(task_id) {
                    return Err(BoardError::validation(
                        "taskIds",
                        format!("unknown task id '{task_id}' in column '{}'", column.id),
                    ));
                }
                if !seen_tasks.insert(task_id) {
                    return Err(BoardError::validation(
                        "taskIds",
                        format!("task id '{task_id}' appears more than once"),
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Generate a fresh opaque id (UUID v4 string)
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Get the current timestamp as an RFC3339 string
pub fn get_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
