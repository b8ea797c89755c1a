//! The fixed set of read-only queries over `flights`, `airlines` and `airports`.
//!
//! Parameters are positional (`?1`, `?2`, ...) in the order each query
//! declares them in [`QueryKind::params`].

use std::fmt;
use std::str::FromStr;

use super::params::ParamSpec;
use crate::error::FlightError;

/// Shared projection for the flight-details queries.
///
/// `flights` and `airlines` both have an `AIRLINE` column, so every column is
/// aliased explicitly: `AIRLINE` is the airline's display name and
/// `AIRLINE_ID` the code stored on the flight.
macro_rules! flight_details_where {
    ($condition:literal) => {
        concat!(
            "SELECT flights.ID AS ID, flights.YEAR AS YEAR, flights.MONTH AS MONTH, ",
            "flights.DAY AS DAY, flights.ORIGIN_AIRPORT AS ORIGIN_AIRPORT, ",
            "flights.DESTINATION_AIRPORT AS DESTINATION_AIRPORT, ",
            "flights.AIRLINE AS AIRLINE_ID, airlines.AIRLINE AS AIRLINE, ",
            "flights.DEPARTURE_TIME AS DEPARTURE_TIME, ",
            "flights.DEPARTURE_DELAY AS DEPARTURE_DELAY, ",
            "flights.ID AS FLIGHT_ID, flights.DEPARTURE_DELAY AS DELAY ",
            "FROM flights JOIN airlines ON flights.AIRLINE = airlines.ID ",
            "WHERE ",
            $condition,
            " ORDER BY flights.ID"
        )
    };
}

/// A delay counts as positive only when it reads as a number above zero;
/// NULL and empty strings never do.
macro_rules! positive_delay {
    () => {
        "CAST(flights.DEPARTURE_DELAY AS REAL) > 0"
    };
}

const FLIGHT_BY_ID_SQL: &str = flight_details_where!("flights.ID = ?1");

const FLIGHTS_BY_AIRPORT_SQL: &str = flight_details_where!("flights.ORIGIN_AIRPORT = ?1");

const FLIGHTS_BY_DATE_SQL: &str = flight_details_where!(
    "flights.DAY = ?1 AND flights.MONTH = ?2 AND flights.YEAR = ?3"
);

const FLIGHTS_BY_AIRLINE_SQL: &str = concat!(
    "SELECT flights.ORIGIN_AIRPORT AS ORIGIN_AIRPORT, ",
    "flights.DESTINATION_AIRPORT AS DESTINATION_AIRPORT, ",
    "flights.DEPARTURE_DELAY AS DELAY, airlines.AIRLINE AS AIRLINE, airlines.ID AS ID ",
    "FROM flights JOIN airlines ON flights.AIRLINE = airlines.ID ",
    "WHERE airlines.AIRLINE = ?1 ORDER BY flights.ID"
);

const DELAYED_AND_DEPARTED_BY_AIRLINE_SQL: &str = concat!(
    "SELECT airlines.AIRLINE AS AIRLINE, ",
    "COUNT(CASE WHEN ",
    positive_delay!(),
    " THEN 1 END) AS num_of_delayed_flights, ",
    "COUNT(flights.DEPARTURE_TIME) AS num_of_flights ",
    "FROM flights JOIN airlines ON flights.AIRLINE = airlines.ID ",
    "GROUP BY airlines.AIRLINE ORDER BY airlines.AIRLINE"
);

const DELAY_AND_DEPARTURE_TIME_SQL: &str = concat!(
    "SELECT flights.DEPARTURE_TIME AS DEPARTURE_TIME, ",
    "CASE WHEN CAST(flights.DEPARTURE_DELAY AS REAL) <= 0 THEN 0 ",
    "ELSE flights.DEPARTURE_DELAY END AS DELAY ",
    "FROM flights ",
    "WHERE flights.DEPARTURE_DELAY IS NOT NULL AND flights.DEPARTURE_DELAY <> '' ",
    "ORDER BY flights.ID"
);

const ROUTE_DELAY_SQL: &str = concat!(
    "SELECT flights.ORIGIN_AIRPORT AS ORIGIN_AIRPORT, ",
    "flights.DESTINATION_AIRPORT AS DESTINATION_AIRPORT, ",
    "CAST(COUNT(CASE WHEN ",
    positive_delay!(),
    " THEN 1 END) * 100.0 / COUNT(*) AS INTEGER) AS percentage_delay ",
    "FROM flights ",
    "GROUP BY flights.ORIGIN_AIRPORT, flights.DESTINATION_AIRPORT ",
    "ORDER BY flights.ORIGIN_AIRPORT, flights.DESTINATION_AIRPORT"
);

const ROUTE_DELAY_WITH_COORDINATES_SQL: &str = concat!(
    "SELECT flights.ORIGIN_AIRPORT AS origin_airport, ",
    "origin.LATITUDE AS origin_latitude, origin.LONGITUDE AS origin_longitude, ",
    "flights.DESTINATION_AIRPORT AS destination_airport, ",
    "destination.LATITUDE AS destination_latitude, ",
    "destination.LONGITUDE AS destination_longitude, ",
    "CAST(COUNT(CASE WHEN ",
    positive_delay!(),
    " THEN 1 END) * 100.0 / COUNT(*) AS INTEGER) AS percentage_delay ",
    "FROM flights ",
    "JOIN airports AS origin ON flights.ORIGIN_AIRPORT = origin.IATA_CODE ",
    "JOIN airports AS destination ON flights.DESTINATION_AIRPORT = destination.IATA_CODE ",
    "GROUP BY flights.ORIGIN_AIRPORT, flights.DESTINATION_AIRPORT, ",
    "origin.LATITUDE, origin.LONGITUDE, destination.LATITUDE, destination.LONGITUDE ",
    "ORDER BY flights.ORIGIN_AIRPORT, flights.DESTINATION_AIRPORT"
);

const ID_PARAMS: &[ParamSpec] = &[ParamSpec::integer("id")];
const IATA_PARAMS: &[ParamSpec] = &[ParamSpec::text("iata")];
const AIRLINE_PARAMS: &[ParamSpec] = &[ParamSpec::text("airline")];
const DATE_PARAMS: &[ParamSpec] = &[
    ParamSpec::integer("day"),
    ParamSpec::integer("month"),
    ParamSpec::integer("year"),
];

/// One of the named queries the application can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    FlightById,
    FlightsByAirport,
    FlightsByDate,
    FlightsByAirline,
    DelayedAndDepartedByAirline,
    DelayAndDepartureTime,
    RouteDelay,
    RouteDelayWithCoordinates,
}

impl QueryKind {
    pub const ALL: [QueryKind; 8] = [
        QueryKind::FlightById,
        QueryKind::FlightsByAirport,
        QueryKind::FlightsByDate,
        QueryKind::FlightsByAirline,
        QueryKind::DelayedAndDepartedByAirline,
        QueryKind::DelayAndDepartureTime,
        QueryKind::RouteDelay,
        QueryKind::RouteDelayWithCoordinates,
    ];

    /// Stable key used to look the query up by name.
    pub fn name(self) -> &'static str {
        match self {
            QueryKind::FlightById => "flight_by_id",
            QueryKind::FlightsByAirport => "flights_by_airport",
            QueryKind::FlightsByDate => "flights_by_date",
            QueryKind::FlightsByAirline => "flights_by_airline",
            QueryKind::DelayedAndDepartedByAirline => "delayed_and_departed_by_airline",
            QueryKind::DelayAndDepartureTime => "delay_and_departure_time",
            QueryKind::RouteDelay => "route_delay",
            QueryKind::RouteDelayWithCoordinates => "route_delay_with_coordinates",
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            QueryKind::FlightById => FLIGHT_BY_ID_SQL,
            QueryKind::FlightsByAirport => FLIGHTS_BY_AIRPORT_SQL,
            QueryKind::FlightsByDate => FLIGHTS_BY_DATE_SQL,
            QueryKind::FlightsByAirline => FLIGHTS_BY_AIRLINE_SQL,
            QueryKind::DelayedAndDepartedByAirline => DELAYED_AND_DEPARTED_BY_AIRLINE_SQL,
            QueryKind::DelayAndDepartureTime => DELAY_AND_DEPARTURE_TIME_SQL,
            QueryKind::RouteDelay => ROUTE_DELAY_SQL,
            QueryKind::RouteDelayWithCoordinates => ROUTE_DELAY_WITH_COORDINATES_SQL,
        }
    }

    /// Declared parameters, in placeholder order.
    pub fn params(self) -> &'static [ParamSpec] {
        match self {
            QueryKind::FlightById => ID_PARAMS,
            QueryKind::FlightsByAirport => IATA_PARAMS,
            QueryKind::FlightsByDate => DATE_PARAMS,
            QueryKind::FlightsByAirline => AIRLINE_PARAMS,
            QueryKind::DelayedAndDepartedByAirline
            | QueryKind::DelayAndDepartureTime
            | QueryKind::RouteDelay
            | QueryKind::RouteDelayWithCoordinates => &[],
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QueryKind {
    type Err = FlightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| FlightError::query(format!("Unknown query '{s}'")))
    }
}
