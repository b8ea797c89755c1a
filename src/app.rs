//! The interactive menu loop.
//!
//! Reads choices from any async line source, runs the selected query and
//! prints a listing or hands a chart to the presenter.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

use crate::charts::{shape, Chart, ChartPresenter};
use crate::cli::OutputFormat;
use crate::config::ChartConfig;
use crate::db::Record;
use crate::error::Result;
use crate::menu::{self, MenuAction};
use crate::query::FlightQueries;
use crate::report;

const TRY_AGAIN: &str = "Try again...";

/// Whether the menu loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Application state for one interactive session.
pub struct App {
    queries: FlightQueries,
    presenter: Box<dyn ChartPresenter>,
    charts: ChartConfig,
    output: OutputFormat,
}

impl App {
    pub fn new(
        queries: FlightQueries,
        presenter: Box<dyn ChartPresenter>,
        charts: ChartConfig,
        output: OutputFormat,
    ) -> Self {
        Self {
            queries,
            presenter,
            charts,
            output,
        }
    }

    /// Runs the menu until the user exits or input ends.
    ///
    /// Query and shaping failures are printed and the menu is shown again;
    /// any other error ends the session.
    pub async fn run<R, W>(&mut self, mut input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        loop {
            write!(out, "{}", menu::menu_text())?;
            out.flush()?;

            let Some(action) =
                read_valid(&mut input, out, "", |line| line.parse::<MenuAction>().ok()).await?
            else {
                break;
            };
            info!(action = action.label(), "Menu action selected");

            match self.dispatch(action, &mut input, out).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) if e.is_recoverable() => {
                    warn!(action = action.label(), error = %e, "Menu action failed");
                    writeln!(out, "Error showing results: {e}")?;
                }
                Err(e) => return Err(e),
            }
        }

        writeln!(out, "Bye!")?;
        out.flush()?;
        Ok(())
    }

    async fn dispatch<R, W>(&mut self, action: MenuAction, input: &mut R, out: &mut W) -> Result<Flow>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        match action {
            MenuAction::FlightById => {
                let Some(id) =
                    read_valid(input, out, "Enter flight ID: ", menu::parse_flight_id).await?
                else {
                    return Ok(Flow::Quit);
                };
                let records = self.queries.flight_by_id(id).await?;
                self.print_flights(&records, out)?;
            }
            MenuAction::FlightsByDate => {
                let Some((day, month, year)) = read_valid(
                    input,
                    out,
                    "Enter date in DD/MM/YYYY format: ",
                    menu::parse_date,
                )
                .await?
                else {
                    return Ok(Flow::Quit);
                };
                let records = self.queries.flights_by_date(day, month, year).await?;
                self.print_flights(&records, out)?;
            }
            MenuAction::DelayedFlightsByAirline => {
                let Some(airline) =
                    read_valid(input, out, "Enter airline name: ", menu::parse_airline).await?
                else {
                    return Ok(Flow::Quit);
                };
                let records = self.queries.flights_by_airline(&airline).await?;
                self.print_flights(&records, out)?;
            }
            MenuAction::DelayedFlightsByAirport => {
                let Some(iata) = read_valid(
                    input,
                    out,
                    "Enter origin airport IATA code: ",
                    menu::parse_iata,
                )
                .await?
                else {
                    return Ok(Flow::Quit);
                };
                let records = self.queries.flights_by_airport(&iata).await?;
                self.print_flights(&records, out)?;
            }
            MenuAction::AirlineDelayChart => {
                let records = self.queries.delayed_and_departed_by_airline().await?;
                let series = shape::airline_delay_percentages(&records)?;
                self.show_chart(records.len(), Chart::AirlineDelay(series), out)?;
            }
            MenuAction::HourlyDelayChart => {
                let records = self.queries.delay_and_departure_time().await?;
                let series = shape::hourly_delays(&records)?;
                self.show_chart(records.len(), Chart::HourlyDelay(series), out)?;
            }
            MenuAction::RouteHeatMap => {
                let records = self.queries.route_delay().await?;
                let series = shape::route_delays(&records)?;
                let chart = Chart::route_heat_map(&series, self.charts.heatmap_sample);
                self.show_chart(records.len(), chart, out)?;
            }
            MenuAction::RouteMap => {
                let records = self.queries.route_delay_with_coordinates().await?;
                let series = shape::route_coordinates(&records)?;
                let chart = Chart::route_map(series, self.charts.route_map_sample);
                self.show_chart(records.len(), chart, out)?;
            }
            MenuAction::Exit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn print_flights<W: Write>(&self, records: &[Record], out: &mut W) -> Result<()> {
        report::write_flights(records, self.output, out)
    }

    fn show_chart<W: Write>(&mut self, rows: usize, chart: Chart, out: &mut W) -> Result<()> {
        if rows == 0 {
            writeln!(out, "No data to chart.")?;
            return Ok(());
        }
        self.presenter.present(&chart, out)
    }

    /// Closes the database pool.
    pub async fn shutdown(&self) -> Result<()> {
        self.queries.close().await
    }
}

/// Prompts until `parse` accepts a line. Returns `None` at end of input.
async fn read_valid<R, W, T>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }

        match parse(&line) {
            Some(value) => return Ok(Some(value)),
            None => writeln!(out, "{TRY_AGAIN}")?,
        }
    }
}
