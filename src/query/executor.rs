//! Runs catalog queries against a database client.
//!
//! Every call validates its parameters, checks the statement is read-only and
//! then fetches the whole result set. Failures are logged and returned; an
//! empty result is not a failure.

use std::time::Instant;

use tracing::{debug, warn};

use super::catalog::QueryKind;
use super::params::Params;
use crate::db::{DatabaseClient, QueryResult, Record};
use crate::error::Result;
use crate::safety::ensure_read_only;

/// Query facade over the flight database.
pub struct FlightQueries {
    db: Box<dyn DatabaseClient>,
}

impl FlightQueries {
    pub fn new(db: Box<dyn DatabaseClient>) -> Self {
        Self { db }
    }

    /// Runs `kind` with the given named parameters.
    pub async fn execute(&self, kind: QueryKind, params: &Params) -> Result<QueryResult> {
        let start = Instant::now();
        let outcome = self.execute_inner(kind, params).await;

        match &outcome {
            Ok(result) => debug!(
                query = kind.name(),
                rows = result.row_count(),
                db_ms = result.execution_time.as_millis() as u64,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Query finished"
            ),
            Err(e) => warn!(query = kind.name(), error = %e, "Query failed"),
        }

        outcome
    }

    /// Runs the query registered under `name`.
    pub async fn execute_named(&self, name: &str, params: &Params) -> Result<QueryResult> {
        let kind = name.parse::<QueryKind>().map_err(|e| {
            warn!(query = name, error = %e, "Query failed");
            e
        })?;
        self.execute(kind, params).await
    }

    async fn execute_inner(&self, kind: QueryKind, params: &Params) -> Result<QueryResult> {
        let bound = params.bind(kind.params())?;
        ensure_read_only(kind.sql())?;
        self.db.fetch_all(kind.sql(), &bound).await
    }

    async fn records(&self, kind: QueryKind, params: Params) -> Result<Vec<Record>> {
        Ok(self.execute(kind, &params).await?.into_records())
    }

    pub async fn flight_by_id(&self, id: i64) -> Result<Vec<Record>> {
        self.records(QueryKind::FlightById, Params::new().with("id", id))
            .await
    }

    /// Flights departing from the airport with the given IATA code.
    pub async fn flights_by_airport(&self, iata: &str) -> Result<Vec<Record>> {
        self.records(QueryKind::FlightsByAirport, Params::new().with("iata", iata))
            .await
    }

    /// Flights operated by the airline with the given display name.
    pub async fn flights_by_airline(&self, airline: &str) -> Result<Vec<Record>> {
        self.records(
            QueryKind::FlightsByAirline,
            Params::new().with("airline", airline),
        )
        .await
    }

    pub async fn flights_by_date(&self, day: i64, month: i64, year: i64) -> Result<Vec<Record>> {
        let params = Params::new()
            .with("day", day)
            .with("month", month)
            .with("year", year);
        self.records(QueryKind::FlightsByDate, params).await
    }

    pub async fn delayed_and_departed_by_airline(&self) -> Result<Vec<Record>> {
        self.records(QueryKind::DelayedAndDepartedByAirline, Params::new())
            .await
    }

    pub async fn delay_and_departure_time(&self) -> Result<Vec<Record>> {
        self.records(QueryKind::DelayAndDepartureTime, Params::new())
            .await
    }

    pub async fn route_delay(&self) -> Result<Vec<Record>> {
        self.records(QueryKind::RouteDelay, Params::new()).await
    }

    pub async fn route_delay_with_coordinates(&self) -> Result<Vec<Record>> {
        self.records(QueryKind::RouteDelayWithCoordinates, Params::new())
            .await
    }

    /// Closes the underlying connection pool.
    pub async fn close(&self) -> Result<()> {
        self.db.close().await
    }
}
