//! Per-Client Synchronization Core
//!
//! Everything a single board client runs: the canonical snapshot owner
//! (`state`), the replication client (`sync`), the presence registry
//! (`presence`) and the controller wiring user intents into mutations
//! and publications (`controller`).
//!
//! The scheduling model is single-threaded and event-driven per client:
//! a mutation is applied synchronously and optimistically to the local
//! snapshot, then the full snapshot is published without waiting for the
//! store to acknowledge it. Remote snapshots arriving over the
//! subscription replace local state wholesale.

/// Canonical snapshot owner
pub mod state;

/// Replication client
pub mod sync;

/// Ephemeral presence tracking
pub mod presence;

/// Board controller
pub mod controller;

pub use controller::BoardController;
pub use presence::PresenceRegistry;
pub use state::BoardStateStore;
pub use sync::{SyncClient, SyncStatus};
