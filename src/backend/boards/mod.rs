//! Boards Module
//!
//! Board CRUD, membership and the per-board activity log.
//!
//! # Module Structure
//!
//! ```text
//! boards/
//! ├── mod.rs       - Module exports and documentation
//! ├── db.rs        - Board and membership queries
//! ├── access.rs    - Member/owner checks, board assembly
//! ├── activity.rs  - Bounded activity log
//! └── handlers.rs  - HTTP handlers
//! ```
//!
//! # Permissions
//!
//! - Reading a board, its lists, cards and activity: owner or member
//! - Updating, deleting, adding or removing members: owner only
//! - The owner is always a member and cannot be removed

pub mod access;
pub mod activity;
pub mod db;
pub mod handlers;

pub use access::{require_member, require_owner};
