//! Replicated Document Store
//!
//! The synchronization core depends on a hierarchical document store that
//! provides exactly three things:
//!
//! 1. atomic whole-document read/write of the board under `boardData`,
//! 2. push-based subscribe-on-change fan-out,
//! 3. a connection-lifecycle primitive that runs a registered store-side
//!    cleanup action automatically when a client's connection drops.
//!
//! Logical paths:
//!
//! - `boardData` - the full board document
//! - `presence/{sessionId}` - one boolean marker per active session
//! - the connection-status signal, used only to trigger initial presence
//!   registration once connectivity is established
//!
//! The in-process implementation in [`memory`] carries these semantics for
//! clients in the same process (and for every test in this repository);
//! the `backend` module exposes the same store over HTTP for external
//! clients.

/// In-process store implementation
pub mod memory;

pub use memory::{DocumentEvent, MemoryStore, PresenceEvent, StoreConnection};
