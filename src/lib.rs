//! XFBoard - Main Library
//!
//! XFBoard is a collaborative task board built with Rust, replicating board
//! state live across simultaneous clients through a subscribe-on-change
//! document store with last-writer-wins semantics.
//!
//! # Overview
//!
//! This library provides the ordered shared-state synchronization core:
//!
//! - Board document model (columns, tasks, ordering) with invariant checks
//! - Typed mutations applied as pure snapshot transitions
//! - Drag-and-drop reorder engine for task and column moves
//! - Replication client publishing full snapshots and adopting remote ones
//! - Ephemeral presence tracking that self-heals on ungraceful disconnects
//!
//! # Module Structure
//!
//! The library is organized into four main modules:
//!
//! - **`shared`** - Types shared between clients and the store server
//!   - Board, column and task structures, mutation commands
//!   - Reorder algorithms, error types, configuration
//!
//! - **`store`** - The replicated document store interface
//!   - In-process store with atomic whole-document writes, push-based
//!     change fan-out and connection-lifecycle cleanup hooks
//!
//! - **`client`** - Per-client synchronization core
//!   - Canonical snapshot owner, sync client, presence registry and the
//!     board controller wiring user intents into mutations
//!
//! - **`backend`** - Store server (only compiled with the `server` feature)
//!   - Axum HTTP server exposing the document over subscription streams
//!   - Presence markers bound to connection lifetime
//!
//! # Consistency Model
//!
//! Replication is last-writer-wins at whole-document granularity: every
//! accepted local mutation publishes the full snapshot, and whichever
//! publish lands last at the store becomes the globally visible state.
//! There is no merge step and no rollback; concurrent edits from other
//! clients can be silently superseded. This is the documented policy, not
//! an accident - see `client::sync`.
//!
//! # Thread Safety
//!
//! - **Store**: `Arc` shared interior with `broadcast::Sender` fan-out
//! - **Client**: synchronous optimistic mutation under a short-lived lock,
//!   asynchronous publication and subscription tasks

/// Shared types and data structures
pub mod shared;

/// Replicated document store
pub mod store;

/// Per-client synchronization core
pub mod client;

/// Backend store server
#[cfg(feature = "server")]
pub mod backend;
