//! Route Configuration Module
//!
//! Router assembly for the store server.

/// Main router creation
pub mod router;

pub use router::create_router;
