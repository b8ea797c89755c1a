//! Horizontal bar chart of delay percentage per airline.

use ratatui::{
    buffer::Buffer,
    layout::{Direction, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Widget},
};

use crate::charts::shape::AirlineDelaySeries;

const BAR_COLOR: Color = Color::Rgb(0x25, 0x96, 0xbe);

/// Bar values are stored in tenths of a percent so one decimal survives.
const SCALE: f64 = 10.0;

pub struct AirlineDelayChart<'a> {
    series: &'a AirlineDelaySeries,
}

impl<'a> AirlineDelayChart<'a> {
    pub fn new(series: &'a AirlineDelaySeries) -> Self {
        Self { series }
    }

    fn bars(&self) -> Vec<Bar<'static>> {
        self.series
            .airlines
            .iter()
            .zip(&self.series.percentages)
            .map(|(airline, pct)| {
                Bar::default()
                    .value((pct.max(0.0) * SCALE).round() as u64)
                    .text_value(format!("{pct:.1}%"))
                    .label(Line::from(airline.clone()))
            })
            .collect()
    }
}

impl Widget for AirlineDelayChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bars = self.bars();
        let max = self
            .series
            .percentages
            .iter()
            .cloned()
            .fold(0.0_f64, f64::max);
        // Leave headroom past the tallest bar, rounded up to the next 5 %.
        let ceiling = ((max / 5.0).floor() + 1.0) * 5.0;

        BarChart::default()
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .bar_style(Style::default().fg(BAR_COLOR))
            .value_style(
                Style::default()
                    .fg(Color::White)
                    .bg(BAR_COLOR)
                    .add_modifier(Modifier::BOLD),
            )
            .label_style(Style::default().add_modifier(Modifier::BOLD))
            .max((ceiling * SCALE) as u64)
            .data(BarGroup::default().bars(&bars))
            .render(area, buf);
    }
}
