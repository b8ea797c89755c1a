//! Origin × destination heat map of route delay percentages.

use std::collections::BTreeMap;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::charts::palette::{normalize, Palette};
use crate::charts::sample_evenly;
use crate::charts::shape::RouteDelaySeries;

const LABEL_WIDTH: u16 = 4;
const HEADER_HEIGHT: u16 = 3;
const CELL_WIDTH: u16 = 2;

/// Shade characters from lowest to highest, so the grid still reads without colour.
const SHADES: [&str; 5] = [" ", "░", "▒", "▓", "█"];

/// Route percentages pivoted into a dense grid.
///
/// Rows are origins and columns destinations, both sorted. Routes that were
/// not sampled are 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatMapGrid {
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
    pub cells: Vec<Vec<f64>>,
}

impl HeatMapGrid {
    /// Samples up to `sample` routes and pivots them. Duplicate routes are averaged.
    pub fn from_routes(series: &RouteDelaySeries, sample: usize) -> Self {
        let routes: Vec<(&str, &str, i64)> = series
            .origins
            .iter()
            .zip(&series.destinations)
            .zip(&series.percentages)
            .map(|((o, d), &p)| (o.as_str(), d.as_str(), p))
            .collect();
        let routes = sample_evenly(routes, sample);

        let mut totals: BTreeMap<(&str, &str), (f64, u32)> = BTreeMap::new();
        for &(origin, destination, pct) in &routes {
            let entry = totals.entry((origin, destination)).or_default();
            entry.0 += pct as f64;
            entry.1 += 1;
        }

        let mut origins: Vec<String> = routes.iter().map(|r| r.0.to_string()).collect();
        origins.sort();
        origins.dedup();
        let mut destinations: Vec<String> = routes.iter().map(|r| r.1.to_string()).collect();
        destinations.sort();
        destinations.dedup();

        let cells = origins
            .iter()
            .map(|origin| {
                destinations
                    .iter()
                    .map(|destination| {
                        totals
                            .get(&(origin.as_str(), destination.as_str()))
                            .map_or(0.0, |(sum, n)| sum / f64::from(*n))
                    })
                    .collect()
            })
            .collect();

        Self {
            origins,
            destinations,
            cells,
        }
    }

    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0.0)
    }

    fn range(&self) -> (f64, f64) {
        self.cells
            .iter()
            .flatten()
            .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .unwrap_or((0.0, 0.0))
    }
}

pub struct RouteHeatMap<'a> {
    grid: &'a HeatMapGrid,
}

impl<'a> RouteHeatMap<'a> {
    pub fn new(grid: &'a HeatMapGrid) -> Self {
        Self { grid }
    }
}

impl Widget for RouteHeatMap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width <= LABEL_WIDTH || area.height <= HEADER_HEIGHT + 1 {
            return;
        }

        let (min, max) = self.grid.range();
        let label_style = Style::default().fg(Color::Gray);

        let columns = usize::from((area.width - LABEL_WIDTH) / CELL_WIDTH);
        let rows = usize::from(area.height - HEADER_HEIGHT - 1);

        // Destination codes are written vertically above their column.
        for (col, destination) in self.grid.destinations.iter().take(columns).enumerate() {
            let x = area.x + LABEL_WIDTH + col as u16 * CELL_WIDTH;
            for (dy, ch) in destination.chars().take(usize::from(HEADER_HEIGHT)).enumerate() {
                buf.set_string(x, area.y + dy as u16, ch.to_string(), label_style);
            }
        }

        for (row, origin) in self.grid.origins.iter().take(rows).enumerate() {
            let y = area.y + HEADER_HEIGHT + row as u16;
            buf.set_stringn(area.x, y, origin, usize::from(LABEL_WIDTH - 1), label_style);

            for col in 0..self.grid.destinations.len().min(columns) {
                let x = area.x + LABEL_WIDTH + col as u16 * CELL_WIDTH;
                let t = normalize(self.grid.value(row, col), min, max);
                let shade = SHADES[(t * (SHADES.len() - 1) as f64).round() as usize];
                let color = Palette::Plasma.color(t);
                for dx in 0..CELL_WIDTH {
                    buf[(x + dx, y)].set_symbol(shade).set_fg(color);
                }
            }
        }

        let legend_y = area.y + area.height - 1;
        legend(min, max).render(Rect::new(area.x, legend_y, area.width, 1), buf);
    }
}

fn legend(min: f64, max: f64) -> Line<'static> {
    let mut spans = vec![Span::raw(format!("{min:.0}% "))];
    for step in 0..=10 {
        let t = f64::from(step) / 10.0;
        spans.push(Span::styled("█", Style::default().fg(Palette::Plasma.color(t))));
    }
    spans.push(Span::raw(format!(" {max:.0}%")));
    Line::from(spans)
}
