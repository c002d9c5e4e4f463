//! Store Server Handlers
//!
//! Board document and presence endpoints. Subscriptions follow the same
//! construction throughout: an unbounded channel feeding a streaming
//! response body, with a task forwarding store broadcast events into the
//! channel and a heartbeat task keeping intermediaries from closing the
//! connection.

/// Board document endpoints
pub mod board;

/// Presence endpoints
pub mod presence;

pub use board::{handle_board_get, handle_board_put};
pub use presence::{handle_presence_get, handle_presence_register, handle_presence_remove};
