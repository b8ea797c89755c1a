//! Vertical bars for the share of flights in each hour of the day.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Widget},
};

use crate::charts::palette::Palette;
use crate::charts::shape::HourlyDelaySeries;

/// Percentages at or above this get the brightest colour.
const COLOR_CEILING: f64 = 10.0;

const SCALE: f64 = 10.0;

pub struct HourlyDelayChart<'a> {
    series: &'a HourlyDelaySeries,
}

impl<'a> HourlyDelayChart<'a> {
    pub fn new(series: &'a HourlyDelaySeries) -> Self {
        Self { series }
    }
}

impl Widget for HourlyDelayChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [chart_area, legend_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .areas(area);

        let shares = self.series.share_by_hour();
        let bars: Vec<Bar> = shares
            .iter()
            .enumerate()
            .map(|(hour, &pct)| {
                let color = Palette::Viridis.color(pct / COLOR_CEILING);
                Bar::default()
                    .value((pct * SCALE).round() as u64)
                    .text_value(format!("{pct:.0}"))
                    .label(Line::from(format!("{hour:02}")))
                    .style(Style::default().fg(color))
                    .value_style(Style::default().fg(Color::Black).bg(color))
            })
            .collect();

        // 24 bars with one-cell gaps; widen bars when there is room.
        let bar_width = (chart_area.width / 24).saturating_sub(1).max(1);

        BarChart::default()
            .bar_width(bar_width)
            .bar_gap(1)
            .data(BarGroup::default().bars(&bars))
            .render(chart_area, buf);

        legend(COLOR_CEILING).render(legend_area, buf);
    }
}

fn legend(ceiling: f64) -> Line<'static> {
    let mut spans = vec![Span::raw("Percentage delayed: 0 ")];
    for step in 0..=10 {
        let t = f64::from(step) / 10.0;
        spans.push(Span::styled("█", Style::default().fg(Palette::Viridis.color(t))));
    }
    spans.push(Span::raw(format!(" {ceiling:.0}+")));
    Line::from(spans)
}
