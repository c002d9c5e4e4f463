//! Backend Module
//!
//! This module contains the store server: an Axum HTTP surface over the
//! in-process replicated store, giving external clients the same three
//! primitives local clients get directly - atomic whole-document writes,
//! push-based subscribe-on-change streams, and presence markers bound to
//! connection lifetime.
//!
//! This module is only compiled when the `server` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization and application state
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`handlers`** - Board document and presence endpoints
//!
//! # Endpoints
//!
//! - `GET /board` - Current board document (with `Subscribe:` header, a
//!   long-lived NDJSON update stream)
//! - `PUT /board` - Atomic full-document overwrite, last writer wins
//! - `GET /presence` - Online count (with `Subscribe:` header, a count
//!   stream)
//! - `PUT /presence/{session}` - Register a session marker
//! - `DELETE /presence/{session}` - Explicitly erase a session marker
//!
//! A subscription carrying `?session=` registers that session's presence
//! marker for the lifetime of the connection; the marker is erased
//! server-side when the stream ends, however it ends. That cleanup is the
//! store's responsibility, never the disconnecting client's.

/// Server setup and state
pub mod server;

/// Route configuration
pub mod routes;

/// Board document and presence handlers
pub mod handlers;

/// Re-export commonly used types
pub use handlers::{handle_board_get, handle_board_put};
pub use server::init::create_app;
pub use server::state::AppState;
