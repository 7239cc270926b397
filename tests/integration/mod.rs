//! Integration tests

pub mod api;
pub mod database;
