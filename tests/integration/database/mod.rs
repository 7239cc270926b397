//! Database integration tests

mod migrations_test;
mod seed_test;
