//! Chart widgets.

pub mod airline;
pub mod heatmap;
pub mod hourly;
pub mod route_map;

pub use airline::AirlineDelayChart;
pub use heatmap::{HeatMapGrid, RouteHeatMap};
pub use hourly::HourlyDelayChart;
pub use route_map::RouteMapChart;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use super::Chart;

/// Draws any [`Chart`] inside a titled border.
pub struct ChartView<'a> {
    chart: &'a Chart,
    footer: Option<&'a str>,
}

impl<'a> ChartView<'a> {
    pub fn new(chart: &'a Chart) -> Self {
        Self {
            chart,
            footer: None,
        }
    }

    /// Adds a hint on the bottom border, such as how to close the chart.
    pub fn footer(mut self, footer: &'a str) -> Self {
        self.footer = Some(footer);
        self
    }
}

impl Widget for ChartView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.chart.title()))
            .title_style(Style::default().add_modifier(Modifier::BOLD));
        if let Some(footer) = self.footer {
            block = block.title_bottom(format!(" {footer} "));
        }

        let inner = block.inner(area);
        block.render(area, buf);

        match self.chart {
            Chart::AirlineDelay(series) => AirlineDelayChart::new(series).render(inner, buf),
            Chart::HourlyDelay(series) => HourlyDelayChart::new(series).render(inner, buf),
            Chart::RouteHeatMap(grid) => RouteHeatMap::new(grid).render(inner, buf),
            Chart::RouteMap(series) => RouteMapChart::new(series).render(inner, buf),
        }
    }
}
