//! Route Configuration Module
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, layers and static fallback
//! - **`api_routes`** - The `/api` routes, public and protected
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint routes
//! ```
//!
//! # Route Order
//!
//! 1. **API Routes** - nested under `/api`; unknown API paths get a JSON 404
//! 2. **Static Files** - everything else is served from the SPA directory,
//!    falling back to its `index.html` so client-side routes resolve

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
