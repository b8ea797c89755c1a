//! A small flight database for integration tests.
//!
//! Flights (all in 2015):
//!
//! | ID | date | route     | airline | time   | delay |
//! |----|------|-----------|---------|--------|-------|
//! | 1  | 1/3  | LAX → SFO | United  | "0915" | 12    |
//! | 2  | 1/3  | LAX → SFO | United  | "1030" | -3    |
//! | 3  | 1/3  | LAX → SFO | Delta   | "1405" | ''    |
//! | 4  | 2/3  | JFK → ORD | Delta   | "0530" | 45    |
//! | 5  | 2/3  | JFK → ORD | Delta   | NULL   | NULL  |
//! | 6  | 1/3  | SFO → LAX | United  | "0700" | 0     |

use flight_delays::config::DatabaseConfig;
use flight_delays::db;
use flight_delays::query::FlightQueries;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tempfile::{tempdir, TempDir};

const SCHEMA: &[&str] = &[
    "CREATE TABLE airlines (ID INTEGER PRIMARY KEY, AIRLINE TEXT)",
    "CREATE TABLE airports (IATA_CODE TEXT PRIMARY KEY, AIRPORT TEXT, LATITUDE REAL, LONGITUDE REAL)",
    "CREATE TABLE flights (
        ID INTEGER PRIMARY KEY,
        YEAR INTEGER,
        MONTH INTEGER,
        DAY INTEGER,
        AIRLINE INTEGER,
        ORIGIN_AIRPORT TEXT,
        DESTINATION_AIRPORT TEXT,
        DEPARTURE_TIME TEXT,
        DEPARTURE_DELAY INTEGER
    )",
];

const DATA: &[&str] = &[
    "INSERT INTO airlines VALUES
        (1, 'United Air Lines Inc.'),
        (2, 'Delta Air Lines Inc.'),
        (3, 'Virgin America')",
    "INSERT INTO airports VALUES
        ('LAX', 'Los Angeles International Airport', 33.94, -118.41),
        ('SFO', 'San Francisco International Airport', 37.62, -122.37),
        ('JFK', 'John F. Kennedy International Airport', 40.64, -73.78),
        ('ORD', 'Chicago O''Hare International Airport', 41.98, -87.90)",
    "INSERT INTO flights VALUES
        (1, 2015, 3, 1, 1, 'LAX', 'SFO', '0915', 12),
        (2, 2015, 3, 1, 1, 'LAX', 'SFO', '1030', -3),
        (3, 2015, 3, 1, 2, 'LAX', 'SFO', '1405', ''),
        (4, 2015, 3, 2, 2, 'JFK', 'ORD', '0530', 45),
        (5, 2015, 3, 2, 2, 'JFK', 'ORD', NULL, NULL),
        (6, 2015, 3, 1, 1, 'SFO', 'LAX', '0700', 0)",
];

/// Creates the fixture database and returns its directory and config.
///
/// Keep the `TempDir` alive for as long as the database is used.
pub async fn flight_database() -> (TempDir, DatabaseConfig) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("flights.sqlite3");

    let options = SqliteConnectOptions::new()
        .filename(&path)
        .journal_mode(SqliteJournalMode::Delete)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    for statement in SCHEMA.iter().chain(DATA) {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }
    pool.close().await;

    (dir, DatabaseConfig::with_path(path))
}

/// Opens the fixture database read-only behind the query facade.
pub async fn flight_queries() -> (TempDir, FlightQueries) {
    let (dir, config) = flight_database().await;
    let client = db::connect(&config).await.unwrap();
    (dir, FlightQueries::new(client))
}
