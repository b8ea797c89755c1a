//! Flight delays - query a flight-delay dataset from the terminal.
//!
//! This library exposes the core modules for use in integration tests.

pub mod app;
pub mod charts;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod menu;
pub mod query;
pub mod report;
pub mod safety;
