//! SQL parsing and read-only classification.
//!
//! Uses sqlparser-rs with the SQLite dialect. Anything that fails to parse is
//! refused.

use sqlparser::ast::{Query, SetExpr, Statement, TableFactor, TableWithJoins};
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;

use super::{Classification, StatementType};

/// SQL classifier that parses queries and decides whether they are read-only.
#[derive(Debug)]
pub struct SqlClassifier {
    dialect: SQLiteDialect,
}

impl Default for SqlClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlClassifier {
    pub fn new() -> Self {
        Self {
            dialect: SQLiteDialect {},
        }
    }

    /// Classifies a SQL string.
    pub fn classify(&self, sql: &str) -> Classification {
        let statements = match Parser::parse_sql(&self.dialect, sql) {
            Ok(statements) => statements,
            Err(e) => {
                return Classification::refused(
                    StatementType::Unknown,
                    format!("could not parse SQL: {e}"),
                )
            }
        };

        match statements.as_slice() {
            [] => Classification::refused(StatementType::Unknown, "empty SQL statement"),
            [statement] => classify_statement(statement),
            many => Classification::refused(
                StatementType::Multiple(many.len()),
                "only one statement may run per query",
            ),
        }
    }
}

/// Convenience function to classify SQL without creating a classifier instance.
pub fn classify_sql(sql: &str) -> Classification {
    SqlClassifier::new().classify(sql)
}

fn classify_statement(statement: &Statement) -> Classification {
    let statement_type = match statement {
        Statement::Query(query) => {
            return if query_is_read_only(query) {
                Classification::read_only(StatementType::Select)
            } else {
                Classification::refused(
                    StatementType::Select,
                    "query contains a data-modifying clause",
                )
            };
        }
        Statement::Insert { .. } => StatementType::Insert,
        Statement::Update { .. } => StatementType::Update,
        Statement::Delete { .. } => StatementType::Delete,
        Statement::Drop { .. } => StatementType::Drop,
        Statement::CreateTable { .. }
        | Statement::CreateIndex { .. }
        | Statement::CreateView { .. } => StatementType::Create,
        Statement::AlterTable { .. } => StatementType::Alter,
        Statement::Pragma { .. } => StatementType::Pragma,
        _ => StatementType::Unknown,
    };

    Classification::refused(statement_type, "only SELECT queries are allowed")
}

/// Checks the query, its CTEs, and every nested subquery in FROM clauses.
fn query_is_read_only(query: &Query) -> bool {
    let ctes_ok = query
        .with
        .as_ref()
        .map_or(true, |with| with.cte_tables.iter().all(|cte| query_is_read_only(&cte.query)));

    ctes_ok && set_expr_is_read_only(&query.body)
}

fn set_expr_is_read_only(set_expr: &SetExpr) -> bool {
    match set_expr {
        SetExpr::Select(select) => select.from.iter().all(table_with_joins_is_read_only),
        SetExpr::Query(query) => query_is_read_only(query),
        SetExpr::SetOperation { left, right, .. } => {
            set_expr_is_read_only(left) && set_expr_is_read_only(right)
        }
        SetExpr::Values(_) | SetExpr::Table(_) => true,
        // INSERT/UPDATE/DELETE bodies nested inside a query
        _ => false,
    }
}

fn table_with_joins_is_read_only(twj: &TableWithJoins) -> bool {
    table_factor_is_read_only(&twj.relation)
        && twj
            .joins
            .iter()
            .all(|join| table_factor_is_read_only(&join.relation))
}

fn table_factor_is_read_only(factor: &TableFactor) -> bool {
    match factor {
        TableFactor::Derived { subquery, .. } => query_is_read_only(subquery),
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => table_with_joins_is_read_only(table_with_joins),
        _ => true,
    }
}
