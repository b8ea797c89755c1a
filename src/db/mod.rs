//! Database abstraction layer.
//!
//! Provides a trait-based interface for executing parameterized statements,
//! so the query layer can run against SQLite or an in-memory mock.

mod mock;
mod sqlite;
mod types;

pub use mock::{ExecutedStatement, FailingDatabaseClient, MockDatabaseClient};
pub use sqlite::SqliteClient;
pub use types::{ColumnInfo, QueryResult, Record, Value};

use crate::config::DatabaseConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Opens the flight database described by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<Box<dyn DatabaseClient>> {
    let client = SqliteClient::connect(config).await?;
    Ok(Box::new(client))
}

/// Trait defining the interface for database clients.
///
/// All database operations are async and return Results with FlightError.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Executes a statement with positional parameters and materializes every row.
    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Closes the database connection pool.
    async fn close(&self) -> Result<()>;
}
