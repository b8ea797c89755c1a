//! Menu entries and input validation for the interactive console.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

/// Length of an IATA airport code.
pub const IATA_LENGTH: usize = 3;

/// A menu entry, keyed by the number the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    FlightById,
    FlightsByDate,
    DelayedFlightsByAirline,
    DelayedFlightsByAirport,
    AirlineDelayChart,
    HourlyDelayChart,
    RouteHeatMap,
    RouteMap,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 9] = [
        MenuAction::FlightById,
        MenuAction::FlightsByDate,
        MenuAction::DelayedFlightsByAirline,
        MenuAction::DelayedFlightsByAirport,
        MenuAction::AirlineDelayChart,
        MenuAction::HourlyDelayChart,
        MenuAction::RouteHeatMap,
        MenuAction::RouteMap,
        MenuAction::Exit,
    ];

    pub fn key(self) -> u8 {
        match self {
            MenuAction::FlightById => 1,
            MenuAction::FlightsByDate => 2,
            MenuAction::DelayedFlightsByAirline => 3,
            MenuAction::DelayedFlightsByAirport => 4,
            MenuAction::AirlineDelayChart => 5,
            MenuAction::HourlyDelayChart => 6,
            MenuAction::RouteHeatMap => 7,
            MenuAction::RouteMap => 8,
            MenuAction::Exit => 9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::FlightById => "Show flight by ID",
            MenuAction::FlightsByDate => "Show flights by date",
            MenuAction::DelayedFlightsByAirline => "Delayed flights by airline",
            MenuAction::DelayedFlightsByAirport => "Delayed flights by origin airport",
            MenuAction::AirlineDelayChart => "Display percentage of delayed flights by airline",
            MenuAction::HourlyDelayChart => {
                "Display percentage of delayed flights per hour of the day"
            }
            MenuAction::RouteHeatMap => {
                "Display percentage of delayed heatmap for each route origin airport -> destination airport"
            }
            MenuAction::RouteMap => "Display Map Plot of percentage of delayed flights per route",
            MenuAction::Exit => "Exit",
        }
    }

    pub fn from_key(key: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.key() == key)
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.key(), self.label())
    }
}

impl FromStr for MenuAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::from_key)
            .ok_or(())
    }
}

/// The menu as printed before each choice.
pub fn menu_text() -> String {
    let mut text = String::from("Menu:\n");
    for action in MenuAction::ALL {
        text.push_str(&action.to_string());
        text.push('\n');
    }
    text
}

pub fn parse_flight_id(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}

/// Parses `DD/MM/YYYY` into `(day, month, year)`.
pub fn parse_date(input: &str) -> Option<(i64, i64, i64)> {
    let date = NaiveDate::parse_from_str(input.trim(), "%d/%m/%Y").ok()?;
    Some((
        i64::from(date.day()),
        i64::from(date.month()),
        i64::from(date.year()),
    ))
}

/// Accepts three letters and returns them upper-cased.
pub fn parse_iata(input: &str) -> Option<String> {
    let code = input.trim();
    (code.chars().count() == IATA_LENGTH && code.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| code.to_ascii_uppercase())
}

/// Any non-empty airline name.
pub fn parse_airline(input: &str) -> Option<String> {
    let name = input.trim();
    (!name.is_empty()).then(|| name.to_string())
}
