//! Integration tests against a temporary SQLite flight database.

pub mod app_test;
pub mod chart_test;
pub mod fixture;
pub mod query_test;
