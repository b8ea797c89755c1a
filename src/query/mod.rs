//! Named flight queries and their execution.
//!
//! The catalog holds the SQL, `params` binds named values to placeholders,
//! and the executor runs them through a [`crate::db::DatabaseClient`].

pub mod catalog;
pub mod executor;
pub mod params;

pub use catalog::QueryKind;
pub use executor::FlightQueries;
pub use params::{ParamKind, ParamSpec, Params};
