//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the synchronization clients and the store server. All types are designed
//! for serialization and transmission as part of the replicated board
//! document.

/// Board document model
pub mod board;

/// Typed board mutations
pub mod mutation;

/// Drag-and-drop reorder engine
pub mod reorder;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use board::{Board, Column, Task};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::BoardError;
pub use mutation::BoardMutation;
