//! Error types for the flight-delay explorer.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for flight-delay operations.
#[derive(Error, Debug)]
pub enum FlightError {
    /// Database connection errors (missing file, unreadable database, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution or binding errors (bad parameter, SQL error, pool timeout, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// A result row is missing a field or holds data that cannot be charted.
    #[error("Shape error: {0}")]
    Shape(String),

    /// Configuration errors (invalid config file, unknown database name, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (terminal I/O, unexpected states, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FlightError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a shape error with the given message.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Shape(_) => "Shape Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// Returns true if the error only aborts the current menu action.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Query(_) | Self::Shape(_))
    }
}

impl From<std::io::Error> for FlightError {
    fn from(e: std::io::Error) -> Self {
        Self::Internal(format!("I/O failure: {e}"))
    }
}

/// Result type alias using FlightError.
pub type Result<T> = std::result::Result<T, FlightError>;
