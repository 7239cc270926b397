//! Cards Module
//!
//! Cards inside lists: text fields, labels, due dates, and moves within or
//! across lists through the reindexer.

pub mod db;
pub mod handlers;
