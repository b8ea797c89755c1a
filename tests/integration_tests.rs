//! Integration tests for flight-delays.
//!
//! Each test builds a small SQLite flight database in a temporary directory.
//!
//! Run with: `cargo test --test integration_tests`

mod integration;
