//! Mock database clients for testing.
//!
//! `MockDatabaseClient` serves canned results keyed by SQL text and records
//! every statement it receives; `FailingDatabaseClient` fails every query.

use super::{DatabaseClient, QueryResult, Value};
use crate::error::{FlightError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// A statement received by the mock, with its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

/// A mock database client that returns predefined results.
#[derive(Debug, Default)]
pub struct MockDatabaseClient {
    results: HashMap<String, QueryResult>,
    fallback: QueryResult,
    executed: Mutex<Vec<ExecutedStatement>>,
}

impl MockDatabaseClient {
    /// Creates a mock that returns an empty result for every statement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `result` for every statement without a more specific entry.
    pub fn with_fallback(mut self, result: QueryResult) -> Self {
        self.fallback = result;
        self
    }

    /// Returns `result` when exactly `sql` is executed.
    pub fn with_result(mut self, sql: impl Into<String>, result: QueryResult) -> Self {
        self.results.insert(sql.into(), result);
        self
    }

    /// Returns every statement executed so far.
    pub fn executed(&self) -> Vec<ExecutedStatement> {
        self.executed
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        self.executed
            .lock()
            .map_err(|_| FlightError::internal("mock statement log poisoned"))?
            .push(ExecutedStatement {
                sql: sql.to_string(),
                params: params.to_vec(),
            });

        Ok(self
            .results
            .get(sql)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A database client whose every query fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingDatabaseClient {
    message: String,
}

impl FailingDatabaseClient {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn fetch_all(&self, _sql: &str, _params: &[Value]) -> Result<QueryResult> {
        Err(FlightError::query(self.message.clone()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
