//! Shared Module
//!
//! Types and data structures shared between the API server and its clients.
//! Everything here is serializable and independent of storage, so a client
//! crate can depend on it without pulling in the server stack.

/// Board, list, card and activity types
pub mod board;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use board::{Activity, Board, BoardList, Card, UserSummary, Visibility};
pub use error::SharedError;
