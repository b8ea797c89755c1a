//! SQLite database client implementation.
//!
//! Provides the `SqliteClient` struct that implements the `DatabaseClient` trait
//! for the flight database using sqlx. The database is opened read-only.

use crate::config::DatabaseConfig;
use crate::db::{ColumnInfo, DatabaseClient, QueryResult, Record, Value};
use crate::error::{FlightError, Result};
use async_trait::async_trait;
use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::query::Query;
use sqlx::{Column as SqlxColumn, Row as SqlxRow, Sqlite, TypeInfo, ValueRef};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// SQLite database client.
#[derive(Debug)]
pub struct SqliteClient {
    pool: SqlitePool,
}

impl SqliteClient {
    /// Creates a new SqliteClient from an existing connection pool.
    ///
    /// This is primarily useful for testing.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens the configured database file read-only.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let path = config.resolved_path();

        if !path.exists() {
            return Err(FlightError::connection(format!(
                "Database file not found: {}",
                path.display()
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .read_only(true)
            .create_if_missing(false)
            .busy_timeout(config.busy_timeout());

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .acquire_timeout(config.acquire_timeout())
            .connect_with(options)
            .await
            .map_err(|e| {
                FlightError::connection(format!(
                    "Cannot open {}: {}",
                    config.display_string(),
                    e
                ))
            })?;

        debug!("Opened flight database at {}", path.display());
        Ok(Self { pool })
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let start = Instant::now();

        // The connection goes back to the pool when `conn` drops, on every path.
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| FlightError::query(format!("Failed to acquire connection: {e}")))?;

        let rows = bind_all(sqlx::query(sql), params)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| FlightError::query(format_query_error(e)))?;

        let execution_time = start.elapsed();

        let columns: Vec<ColumnInfo> = rows
            .first()
            .map(|row| {
                row.columns()
                    .iter()
                    .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
                    .collect()
            })
            .unwrap_or_default();

        let names: Arc<[String]> = columns.iter().map(|c| c.name.clone()).collect();
        let records = rows
            .iter()
            .map(|row| convert_row(row).map(|values| Record::new(Arc::clone(&names), values)))
            .collect::<Result<Vec<_>>>()?;

        Ok(QueryResult {
            columns,
            rows: records,
            execution_time,
        })
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

/// Binds positional values onto a query in order.
fn bind_all<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &[Value],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in params {
        query = match value {
            Value::Null => query.bind(None::<i64>),
            Value::Bool(b) => query.bind(*b),
            Value::Int(i) => query.bind(*i),
            Value::Float(f) => query.bind(*f),
            Value::String(s) => query.bind(s.clone()),
            Value::Bytes(b) => query.bind(b.clone()),
        };
    }
    query
}

/// Converts a SQLite row into positional values using each cell's storage class.
fn convert_row(row: &SqliteRow) -> Result<Vec<Value>> {
    (0..row.len()).map(|i| convert_value(row, i)).collect()
}

fn convert_value(row: &SqliteRow, index: usize) -> Result<Value> {
    let raw = row
        .try_get_raw(index)
        .map_err(|e| FlightError::query(format!("Failed to read column {index}: {e}")))?;

    if raw.is_null() {
        return Ok(Value::Null);
    }

    // SQLite is dynamically typed; decide by the value's runtime type rather
    // than the declared column type.
    let storage = raw.type_info().name().to_string();
    let decoded = match storage.as_str() {
        "INTEGER" => row.try_get_unchecked::<i64, _>(index).map(Value::Int),
        "REAL" => row.try_get_unchecked::<f64, _>(index).map(Value::Float),
        "BOOLEAN" => row.try_get_unchecked::<bool, _>(index).map(Value::Bool),
        "BLOB" => row.try_get_unchecked::<Vec<u8>, _>(index).map(Value::Bytes),
        _ => row.try_get_unchecked::<String, _>(index).map(Value::String),
    };

    decoded.map_err(|e| {
        FlightError::query(format!(
            "Failed to decode column {index} ({storage}): {e}"
        ))
    })
}

/// Formats a sqlx error into a user-friendly message.
fn format_query_error(e: sqlx::Error) -> String {
    match e {
        sqlx::Error::Database(db_err) => db_err.message().to_string(),
        sqlx::Error::PoolTimedOut => "Timed out waiting for a database connection".to_string(),
        sqlx::Error::PoolClosed => "Database connection pool is closed".to_string(),
        other => other.to_string(),
    }
}
