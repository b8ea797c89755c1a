//! Turns query records into the column arrays the charts draw.
//!
//! Every shaper either converts all of its records or fails with a
//! [`FlightError::Shape`]; partial series are never returned.

use crate::db::{Record, Value};
use crate::error::{FlightError, Result};

/// Percentage of delayed flights per airline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirlineDelaySeries {
    pub airlines: Vec<String>,
    pub percentages: Vec<f64>,
}

/// One entry per flight with a known delay: the delay and its departure hour.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlyDelaySeries {
    pub delays: Vec<i64>,
    pub hours: Vec<u8>,
}

impl HourlyDelaySeries {
    /// Share of flights (in percent) departing in each hour of the day.
    ///
    /// Hours with no flights are 0. An empty series yields all zeros.
    pub fn share_by_hour(&self) -> [f64; 24] {
        let mut counts = [0usize; 24];
        for &hour in &self.hours {
            counts[usize::from(hour) % 24] += 1;
        }

        let total = self.hours.len();
        let mut shares = [0.0; 24];
        if total == 0 {
            return shares;
        }
        for (share, count) in shares.iter_mut().zip(counts) {
            *share = count as f64 / total as f64 * 100.0;
        }
        shares
    }
}

/// Percentage of delayed flights per origin/destination pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteDelaySeries {
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
    pub percentages: Vec<i64>,
}

impl RouteDelaySeries {
    pub fn len(&self) -> usize {
        self.percentages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.percentages.is_empty()
    }
}

/// A route with the coordinates of both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePoint {
    pub origin: String,
    pub origin_latitude: f64,
    pub origin_longitude: f64,
    pub destination: String,
    pub destination_latitude: f64,
    pub destination_longitude: f64,
    pub percentage: i64,
}

/// Routes with coordinates, for the map plot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteMapSeries {
    pub routes: Vec<RoutePoint>,
}

/// Shapes `delayed_and_departed_by_airline` rows.
pub fn airline_delay_percentages(records: &[Record]) -> Result<AirlineDelaySeries> {
    let mut series = AirlineDelaySeries::default();

    for record in records {
        let airline = text_field(record, "AIRLINE")?;
        let delayed = int_field(record, "num_of_delayed_flights")?;
        let total = int_field(record, "num_of_flights")?;

        if total == 0 {
            return Err(FlightError::shape(format!(
                "Airline '{airline}' has no departed flights"
            )));
        }

        series.airlines.push(airline);
        series
            .percentages
            .push(delayed as f64 / total as f64 * 100.0);
    }

    Ok(series)
}

/// Shapes `delay_and_departure_time` rows.
pub fn hourly_delays(records: &[Record]) -> Result<HourlyDelaySeries> {
    let mut series = HourlyDelaySeries::default();

    for record in records {
        let delay = delay_or_zero(field(record, "DELAY")?)?;
        let hour = departure_hour(field(record, "DEPARTURE_TIME")?)?;
        series.delays.push(delay);
        series.hours.push(hour);
    }

    Ok(series)
}

/// Shapes `route_delay` rows.
pub fn route_delays(records: &[Record]) -> Result<RouteDelaySeries> {
    let mut series = RouteDelaySeries::default();

    for record in records {
        series.origins.push(text_field(record, "ORIGIN_AIRPORT")?);
        series
            .destinations
            .push(text_field(record, "DESTINATION_AIRPORT")?);
        series
            .percentages
            .push(int_field(record, "percentage_delay")?);
    }

    Ok(series)
}

/// Shapes `route_delay_with_coordinates` rows.
pub fn route_coordinates(records: &[Record]) -> Result<RouteMapSeries> {
    let routes = records
        .iter()
        .map(|record| {
            Ok(RoutePoint {
                origin: text_field(record, "origin_airport")?,
                origin_latitude: float_field(record, "origin_latitude")?,
                origin_longitude: float_field(record, "origin_longitude")?,
                destination: text_field(record, "destination_airport")?,
                destination_latitude: float_field(record, "destination_latitude")?,
                destination_longitude: float_field(record, "destination_longitude")?,
                percentage: int_field(record, "percentage_delay")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RouteMapSeries { routes })
}

/// Extracts the hour from an `HHMM` departure time.
///
/// Three-digit text is left-padded (`"915"` is 09:15). Numeric times are
/// padded to four digits, so `5` is 00:05. `2400` is midnight and maps to
/// hour 0.
pub fn departure_hour(value: &Value) -> Result<u8> {
    let padded = match value {
        Value::String(s) => {
            let raw = s.trim();
            if !(3..=4).contains(&raw.len()) || !raw.bytes().all(|b| b.is_ascii_digit()) {
                return Err(FlightError::shape(format!(
                    "Departure time must be HHMM, got '{raw}'"
                )));
            }
            format!("{raw:0>4}")
        }
        Value::Int(i) => numeric_time(*i)?,
        Value::Float(f) if f.fract() == 0.0 => numeric_time(*f as i64)?,
        other => {
            return Err(FlightError::shape(format!(
                "Departure time must be HHMM, got {}",
                other.type_name()
            )))
        }
    };

    let hour: u8 = padded[..2]
        .parse()
        .map_err(|_| FlightError::shape(format!("Invalid departure time '{padded}'")))?;

    match hour {
        24 => Ok(0),
        0..=23 => Ok(hour),
        _ => Err(FlightError::shape(format!(
            "Departure hour out of range in '{padded}'"
        ))),
    }
}

fn numeric_time(time: i64) -> Result<String> {
    if !(0..=2400).contains(&time) {
        return Err(FlightError::shape(format!(
            "Departure time must be HHMM, got '{time}'"
        )));
    }
    Ok(format!("{time:04}"))
}

/// Coerces a delay to whole minutes, treating NULL and empty text as 0.
pub fn delay_or_zero(value: &Value) -> Result<i64> {
    if value.is_blank() {
        return Ok(0);
    }
    to_int(value).ok_or_else(|| {
        FlightError::shape(format!("Delay is not a number: '{value}'"))
    })
}

fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn field<'a>(record: &'a Record, column: &str) -> Result<&'a Value> {
    record
        .get(column)
        .ok_or_else(|| FlightError::shape(format!("Missing column '{column}'")))
}

fn text_field(record: &Record, column: &str) -> Result<String> {
    match field(record, column)? {
        Value::Null => Err(FlightError::shape(format!("Column '{column}' is NULL"))),
        value => Ok(value.to_display_string()),
    }
}

fn int_field(record: &Record, column: &str) -> Result<i64> {
    let value = field(record, column)?;
    to_int(value).ok_or_else(|| {
        FlightError::shape(format!("Column '{column}' is not an integer: '{value}'"))
    })
}

fn float_field(record: &Record, column: &str) -> Result<f64> {
    let value = field(record, column)?;
    to_float(value).ok_or_else(|| {
        FlightError::shape(format!("Column '{column}' is not a number: '{value}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airline_row(name: &str, delayed: i64, total: i64) -> Record {
        Record::from_pairs([
            ("AIRLINE", Value::from(name)),
            ("num_of_delayed_flights", Value::Int(delayed)),
            ("num_of_flights", Value::Int(total)),
        ])
    }

    fn time_row(time: Value, delay: Value) -> Record {
        Record::from_pairs([("DEPARTURE_TIME", time), ("DELAY", delay)])
    }

    #[test]
    fn test_airline_percentages() {
        let rows = vec![
            airline_row("Delta Air Lines Inc.", 1, 2),
            airline_row("United Air Lines Inc.", 1, 3),
        ];
        let series = airline_delay_percentages(&rows).unwrap();

        assert_eq!(series.airlines, ["Delta Air Lines Inc.", "United Air Lines Inc."]);
        assert_eq!(series.percentages[0], 50.0);
        assert!((series.percentages[1] - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_airline_with_no_flights_is_an_error() {
        let rows = vec![airline_row("A", 1, 2), airline_row("B", 0, 0)];
        let err = airline_delay_percentages(&rows).unwrap_err();
        assert_eq!(err.category(), "Shape Error");
        assert!(err.to_string().contains("'B'"));
    }

    #[test]
    fn test_departure_hour() {
        assert_eq!(departure_hour(&Value::from("915")).unwrap(), 9);
        assert_eq!(departure_hour(&Value::from("0530")).unwrap(), 5);
        assert_eq!(departure_hour(&Value::from("2359")).unwrap(), 23);
        assert_eq!(departure_hour(&Value::from("2400")).unwrap(), 0);
        assert_eq!(departure_hour(&Value::Int(1405)).unwrap(), 14);
        assert_eq!(departure_hour(&Value::Float(700.0)).unwrap(), 7);
        assert_eq!(departure_hour(&Value::Int(2400)).unwrap(), 0);
    }

    #[test]
    fn test_departure_hour_numeric_after_midnight() {
        assert_eq!(departure_hour(&Value::Int(5)).unwrap(), 0);
        assert_eq!(departure_hour(&Value::Int(45)).unwrap(), 0);
        assert_eq!(departure_hour(&Value::Int(0)).unwrap(), 0);
        assert_eq!(departure_hour(&Value::Float(30.0)).unwrap(), 0);
        assert_eq!(departure_hour(&Value::Int(915)).unwrap(), 9);
    }

    #[test]
    fn test_departure_hour_rejects_garbage() {
        for bad in ["X", "", "12", "12345", "9:15", "2515"] {
            assert!(
                departure_hour(&Value::from(bad)).is_err(),
                "'{bad}' should be rejected"
            );
        }
        assert!(departure_hour(&Value::Null).is_err());
        assert!(departure_hour(&Value::Int(-5)).is_err());
        assert!(departure_hour(&Value::Int(2401)).is_err());
        assert!(departure_hour(&Value::Float(7.5)).is_err());
    }

    #[test]
    fn test_hourly_delays() {
        let rows = vec![
            time_row(Value::from("0915"), Value::Int(12)),
            time_row(Value::from("1030"), Value::Int(0)),
            time_row(Value::from("530"), Value::from("45")),
        ];
        let series = hourly_delays(&rows).unwrap();
        assert_eq!(series.hours, [9, 10, 5]);
        assert_eq!(series.delays, [12, 0, 45]);
    }

    #[test]
    fn test_hourly_delays_fails_whole_series() {
        let rows = vec![
            time_row(Value::from("0915"), Value::Int(12)),
            time_row(Value::from("X"), Value::Int(3)),
        ];
        assert!(hourly_delays(&rows).is_err());
    }

    #[test]
    fn test_share_by_hour() {
        let series = HourlyDelaySeries {
            delays: vec![1, 2, 3, 4],
            hours: vec![9, 9, 10, 23],
        };
        let shares = series.share_by_hour();
        assert_eq!(shares[9], 50.0);
        assert_eq!(shares[10], 25.0);
        assert_eq!(shares[23], 25.0);
        assert_eq!(shares[0], 0.0);

        assert_eq!(HourlyDelaySeries::default().share_by_hour(), [0.0; 24]);
    }

    #[test]
    fn test_delay_or_zero() {
        assert_eq!(delay_or_zero(&Value::Null).unwrap(), 0);
        assert_eq!(delay_or_zero(&Value::from("")).unwrap(), 0);
        assert_eq!(delay_or_zero(&Value::from("-3")).unwrap(), -3);
        assert_eq!(delay_or_zero(&Value::Float(12.9)).unwrap(), 12);
        assert!(delay_or_zero(&Value::from("late")).is_err());
    }

    #[test]
    fn test_route_delays() {
        let rows = vec![Record::from_pairs([
            ("ORIGIN_AIRPORT", Value::from("LAX")),
            ("DESTINATION_AIRPORT", Value::from("SFO")),
            ("percentage_delay", Value::Int(33)),
        ])];
        let series = route_delays(&rows).unwrap();
        assert_eq!(series.origins, ["LAX"]);
        assert_eq!(series.destinations, ["SFO"]);
        assert_eq!(series.percentages, [33]);
    }

    #[test]
    fn test_route_coordinates_coerces_text_numbers() {
        let rows = vec![Record::from_pairs([
            ("origin_airport", Value::from("JFK")),
            ("origin_latitude", Value::from("40.64")),
            ("origin_longitude", Value::Float(-73.78)),
            ("destination_airport", Value::from("ORD")),
            ("destination_latitude", Value::Float(41.98)),
            ("destination_longitude", Value::Int(-88)),
            ("percentage_delay", Value::Int(50)),
        ])];
        let series = route_coordinates(&rows).unwrap();
        let route = &series.routes[0];
        assert_eq!(route.origin_latitude, 40.64);
        assert_eq!(route.destination_longitude, -88.0);
        assert_eq!(route.percentage, 50);
    }

    #[test]
    fn test_route_coordinates_rejects_missing_latitude() {
        let rows = vec![Record::from_pairs([
            ("origin_airport", Value::from("JFK")),
            ("origin_latitude", Value::Null),
        ])];
        assert!(route_coordinates(&rows).is_err());
    }
}
