//! Lists Module
//!
//! Lists (columns) on a board. A list's `position` is dense within its board
//! and only ever changed by the reindexer; archiving leaves it in place.

pub mod db;
pub mod handlers;
