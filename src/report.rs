//! Printing flight listings.

use std::io::Write;

use crate::charts::shape::delay_or_zero;
use crate::cli::OutputFormat;
use crate::db::{Record, Value};
use crate::error::{FlightError, Result};

/// Formats one flight-details record.
///
/// Delayed flights get a `Delay: N Minutes` suffix; on-time, early, and
/// unknown delays do not.
pub fn format_flight(record: &Record) -> Result<String> {
    let delay = delay_or_zero(required(record, "DELAY")?)?;
    let id = required(record, "ID")?;
    let origin = required(record, "ORIGIN_AIRPORT")?;
    let destination = required(record, "DESTINATION_AIRPORT")?;
    let airline = required(record, "AIRLINE")?;

    let line = if delay > 0 {
        format!("{id}. {origin} -> {destination} by {airline}, Delay: {delay} Minutes")
    } else {
        format!("{id}. {origin} -> {destination} by {airline}")
    };
    Ok(line)
}

/// Formats a whole listing. Fails without output if any record is malformed.
pub fn format_flights(records: &[Record]) -> Result<Vec<String>> {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(format!("Got {} results.", records.len()));
    for record in records {
        lines.push(format_flight(record)?);
    }
    Ok(lines)
}

/// Writes a listing in the chosen format.
pub fn write_flights(records: &[Record], format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for line in format_flights(records)? {
                writeln!(out, "{line}")?;
            }
        }
        OutputFormat::Json => {
            let records = records
                .iter()
                .map(json_flight)
                .collect::<Result<Vec<_>>>()?;
            let json = serde_json::to_string_pretty(&records).map_err(|e| {
                FlightError::internal(format!("Failed to serialize results: {e}"))
            })?;
            writeln!(out, "{json}")?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Checks a record like `format_flight` does and replaces `DELAY` with whole
/// minutes, keeping column order.
fn json_flight(record: &Record) -> Result<Record> {
    for column in ["ID", "ORIGIN_AIRPORT", "DESTINATION_AIRPORT", "AIRLINE"] {
        required(record, column)?;
    }
    let delay = delay_or_zero(required(record, "DELAY")?)?;

    Ok(Record::from_pairs(record.iter().map(|(name, value)| {
        if name.eq_ignore_ascii_case("DELAY") {
            (name, Value::Int(delay))
        } else {
            (name, value.clone())
        }
    })))
}

fn required<'a>(record: &'a Record, column: &str) -> Result<&'a Value> {
    record
        .get(column)
        .ok_or_else(|| FlightError::shape(format!("Result row has no '{column}' column")))
}
