//! Backend Module
//!
//! Server-side code for the taskboard API: an Axum HTTP server over SQLite.
//! Only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Route tables and router assembly
//! - **`auth`** - Users, password hashing, JWT sessions, auth handlers
//! - **`middleware`** - Bearer token authentication
//! - **`reindex`** - Dense position maintenance for lists and cards
//! - **`boards`** - Boards, membership, access checks, activity log
//! - **`lists`** - List storage and handlers
//! - **`cards`** - Card storage and handlers
//! - **`seed`** - Demo data
//! - **`error`** - Backend error type and HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── reindex/        - Position reindexer
//! ├── boards/         - Boards, members, activity
//! ├── lists/          - Lists
//! ├── cards/          - Cards
//! ├── seed.rs         - Demo data
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! Handlers share an [`server::AppState`] holding the SQLite pool, the
//! [`reindex::Reindexer`] and the auth settings. Every list or card operation
//! that changes a sibling set goes through the reindexer, which serializes
//! work per parent and runs each operation in one transaction.

/// Server setup and configuration
#[cfg(feature = "ssr")]
pub mod server;

/// Route configuration
#[cfg(feature = "ssr")]
pub mod routes;

/// Backend error types
#[cfg(feature = "ssr")]
pub mod error;

/// Authentication and user management
#[cfg(feature = "ssr")]
pub mod auth;

/// Middleware for request processing
#[cfg(feature = "ssr")]
pub mod middleware;

/// Position maintenance for ordered siblings
#[cfg(feature = "ssr")]
pub mod reindex;

/// Boards, membership and activity
#[cfg(feature = "ssr")]
pub mod boards;

/// Lists within a board
#[cfg(feature = "ssr")]
pub mod lists;

/// Cards within a list
#[cfg(feature = "ssr")]
pub mod cards;

/// Demo data seeding
#[cfg(feature = "ssr")]
pub mod seed;

/// Re-export commonly used types
#[cfg(feature = "ssr")]
pub use server::create_app;
#[cfg(feature = "ssr")]
pub use error::BackendError;
#[cfg(feature = "ssr")]
pub use reindex::{Placement, ReindexError, Reindexer, Scope};
