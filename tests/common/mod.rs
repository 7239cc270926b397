//! Common test utilities and helpers
//!
//! - Database fixtures
//! - In-process application fixture
//! - Authentication helpers
//! - Custom assertion macros

pub mod assertions;
pub mod auth_helpers;

// Re-export commonly used utilities
pub use app::*;
pub use auth_helpers::*;
pub use database::*;
