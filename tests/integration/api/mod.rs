//! API integration tests
//!
//! Drive the full router in-process: routing, auth middleware, handlers and
//! the SQLite store.

mod auth_test;
mod cards_test;
