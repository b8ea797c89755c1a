//! Chart shaping and rendering.
//!
//! Query records are shaped into series (`shape`), wrapped in a [`Chart`],
//! and shown by a [`ChartPresenter`] either full-screen or as plain text.

pub mod palette;
pub mod present;
pub mod shape;
pub mod widgets;

pub use present::{presenter_for, ChartPresenter, TerminalPresenter, TextPresenter};
pub use shape::{AirlineDelaySeries, HourlyDelaySeries, RouteDelaySeries, RouteMapSeries};
pub use widgets::{ChartView, HeatMapGrid};

/// A chart ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    AirlineDelay(AirlineDelaySeries),
    HourlyDelay(HourlyDelaySeries),
    RouteHeatMap(HeatMapGrid),
    RouteMap(RouteMapSeries),
}

impl Chart {
    /// Pivots at most `sample` routes into a heat map.
    pub fn route_heat_map(series: &RouteDelaySeries, sample: usize) -> Self {
        Chart::RouteHeatMap(HeatMapGrid::from_routes(series, sample))
    }

    /// Keeps at most `sample` routes for the map.
    pub fn route_map(series: RouteMapSeries, sample: usize) -> Self {
        Chart::RouteMap(RouteMapSeries {
            routes: sample_evenly(series.routes, sample),
        })
    }

    pub fn title(&self) -> &'static str {
        match self {
            Chart::AirlineDelay(_) => "Percentage of Delayed Flights by Airline",
            Chart::HourlyDelay(_) => "Percentage of Delayed Flights per Hour of the Day",
            Chart::RouteHeatMap(_) => "Percentage of Delayed Flights per Route (Origin -> Destination)",
            Chart::RouteMap(_) => "Percentage of Delayed Flights per Route",
        }
    }
}

/// Picks at most `n` items spread evenly across `items`, keeping their order.
///
/// The same input always yields the same sample.
pub fn sample_evenly<T>(items: Vec<T>, n: usize) -> Vec<T> {
    let len = items.len();
    if len <= n {
        return items;
    }
    if n == 0 {
        return Vec::new();
    }

    let mut wanted = (0..n).map(|i| i * len / n).peekable();
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            if wanted.peek() == Some(&i) {
                wanted.next();
                Some(item)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_evenly() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(sample_evenly(items.clone(), 5), [0, 2, 4, 6, 8]);
        assert_eq!(sample_evenly(items.clone(), 3), [0, 3, 6]);
        assert_eq!(sample_evenly(items.clone(), 20), items);
        assert!(sample_evenly(items, 0).is_empty());
    }

    #[test]
    fn test_route_map_is_sampled() {
        let route = shape::RoutePoint {
            origin: "LAX".into(),
            origin_latitude: 33.94,
            origin_longitude: -118.41,
            destination: "SFO".into(),
            destination_latitude: 37.62,
            destination_longitude: -122.37,
            percentage: 33,
        };
        let series = RouteMapSeries {
            routes: vec![route; 120],
        };
        match Chart::route_map(series, 50) {
            Chart::RouteMap(sampled) => assert_eq!(sampled.routes.len(), 50),
            other => panic!("unexpected chart {other:?}"),
        }
    }
}
