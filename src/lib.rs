//! Taskboard - Main Library
//!
//! A Trello-style board server: users own boards, boards hold ordered lists,
//! lists hold ordered cards. Positions are kept dense (`0..n`) under every
//! parent by the backend's reindexer.
//!
//! # Module Structure
//!
//! - **`shared`** - Request/response types and validation shared with clients
//!   - Boards, lists, cards, activity entries
//!   - Error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, JWT authentication
//!   - SQLite persistence through sqlx
//!   - Position reindexer
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the backend modules (default)
//!
//! # Usage
//!
//! ```rust,no_run
//! use taskboard::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
