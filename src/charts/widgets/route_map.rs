//! Routes drawn over a world map, coloured by delay percentage.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as RouteLine, Map, MapResolution, Points},
        Widget,
    },
};

use crate::charts::palette::{normalize, Palette};
use crate::charts::shape::RouteMapSeries;

/// Degrees added around the outermost airports.
const PADDING: f64 = 0.5;

/// Longitude and latitude bounds enclosing every airport in `series`.
pub fn bounds(series: &RouteMapSeries) -> ([f64; 2], [f64; 2]) {
    let mut lon = [f64::INFINITY, f64::NEG_INFINITY];
    let mut lat = [f64::INFINITY, f64::NEG_INFINITY];

    for route in &series.routes {
        for (x, y) in [
            (route.origin_longitude, route.origin_latitude),
            (route.destination_longitude, route.destination_latitude),
        ] {
            lon = [lon[0].min(x), lon[1].max(x)];
            lat = [lat[0].min(y), lat[1].max(y)];
        }
    }

    if series.routes.is_empty() {
        return ([-180.0, 180.0], [-90.0, 90.0]);
    }
    (
        [lon[0] - PADDING, lon[1] + PADDING],
        [lat[0] - PADDING, lat[1] + PADDING],
    )
}

pub struct RouteMapChart<'a> {
    series: &'a RouteMapSeries,
}

impl<'a> RouteMapChart<'a> {
    pub fn new(series: &'a RouteMapSeries) -> Self {
        Self { series }
    }

    fn percentage_range(&self) -> (f64, f64) {
        self.series
            .routes
            .iter()
            .map(|r| r.percentage as f64)
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .unwrap_or((0.0, 0.0))
    }
}

impl Widget for RouteMapChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [map_area, legend_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .areas(area);

        let (x_bounds, y_bounds) = bounds(self.series);
        let (min, max) = self.percentage_range();
        let routes = &self.series.routes;

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                ctx.draw(&Map {
                    resolution: MapResolution::High,
                    color: Color::DarkGray,
                });
                ctx.layer();

                for route in routes {
                    let color = Palette::Viridis.color(normalize(route.percentage as f64, min, max));
                    ctx.draw(&RouteLine {
                        x1: route.origin_longitude,
                        y1: route.origin_latitude,
                        x2: route.destination_longitude,
                        y2: route.destination_latitude,
                        color,
                    });
                    ctx.draw(&Points {
                        coords: &[
                            (route.origin_longitude, route.origin_latitude),
                            (route.destination_longitude, route.destination_latitude),
                        ],
                        color,
                    });
                }
                ctx.layer();

                for route in routes {
                    ctx.print(
                        route.origin_longitude,
                        route.origin_latitude,
                        Span::styled(route.origin.clone(), Style::default().fg(Color::White)),
                    );
                }
            })
            .render(map_area, buf);

        legend(min, max).render(legend_area, buf);
    }
}

fn legend(min: f64, max: f64) -> Line<'static> {
    let mut spans = vec![Span::raw(format!("Percentage delay: {min:.0}% "))];
    for step in 0..=10 {
        let t = f64::from(step) / 10.0;
        spans.push(Span::styled("█", Style::default().fg(Palette::Viridis.color(t))));
    }
    spans.push(Span::raw(format!(" {max:.0}%")));
    Line::from(spans)
}
