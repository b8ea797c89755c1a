//! Read-only statement guard.
//!
//! Parses SQL and refuses anything that is not a plain query, so no catalog
//! entry can ever modify the flight database.

mod parser;

pub use parser::{classify_sql, SqlClassifier};

use crate::error::{FlightError, Result};
use std::fmt;

/// The type of SQL statement detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementType {
    Select,
    Insert,
    Update,
    Delete,
    Drop,
    Create,
    Alter,
    Pragma,
    /// Multiple statements in one string.
    Multiple(usize),
    /// Statement type could not be determined.
    Unknown,
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select => write!(f, "SELECT"),
            Self::Insert => write!(f, "INSERT"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
            Self::Drop => write!(f, "DROP"),
            Self::Create => write!(f, "CREATE"),
            Self::Alter => write!(f, "ALTER"),
            Self::Pragma => write!(f, "PRAGMA"),
            Self::Multiple(n) => write!(f, "{n} statements"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Result of classifying a SQL string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub statement_type: StatementType,
    pub read_only: bool,
    /// Why the statement was refused, when it was.
    pub reason: Option<String>,
}

impl Classification {
    pub fn read_only(statement_type: StatementType) -> Self {
        Self {
            statement_type,
            read_only: true,
            reason: None,
        }
    }

    pub fn refused(statement_type: StatementType, reason: impl Into<String>) -> Self {
        Self {
            statement_type,
            read_only: false,
            reason: Some(reason.into()),
        }
    }
}

/// Returns an error unless `sql` is a single read-only query.
pub fn ensure_read_only(sql: &str) -> Result<()> {
    let classification = classify_sql(sql);
    if classification.read_only {
        return Ok(());
    }
    Err(FlightError::query(format!(
        "Refusing to run {} statement: {}",
        classification.statement_type,
        classification
            .reason
            .as_deref()
            .unwrap_or("not a read-only query")
    )))
}
