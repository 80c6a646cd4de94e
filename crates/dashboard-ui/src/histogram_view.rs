//! Bar chart of rides per hour of day.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use dashboard_core::formatting::hour_label;
use dashboard_core::models::HOURS_PER_DAY;
use dashboard_data::histogram::HourHistogram;

use crate::themes::{hour_color, Theme};

/// Hint shown between the map and the histogram.
pub const HISTOGRAM_HINT: &str = "Select any of the bars on the histogram to section data by time.";

/// Width of each of the 24 bars for a chart `inner_width` columns wide.
pub fn bar_width(inner_width: u16) -> u16 {
    (inner_width / HOURS_PER_DAY as u16).max(1)
}

/// Axis label for a bar `width` columns wide.
///
/// Every bar uses the same format: `"8:00"` when the widest label (`"23:00"`)
/// fits, else the bare hour `"8"`.
pub fn bar_label(hour: u8, width: u16) -> String {
    let widest = hour_label(HOURS_PER_DAY as u8 - 1).len();
    if widest <= usize::from(width) {
        hour_label(hour)
    } else {
        hour.to_string()
    }
}

/// Render the histogram into `area`, or a placeholder when nothing matches.
pub fn render_histogram(frame: &mut Frame, area: Rect, histogram: &HourHistogram, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .style(Style::default().bg(theme.chart_background))
        .title(" Rides by hour ");

    if histogram.total() == 0 {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No rides match the current selection",
                theme.warning,
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let width = bar_width(block.inner(area).width);
    let bars: Vec<Bar> = (0u8..)
        .zip(histogram.counts().iter().copied())
        .map(|(hour, count)| {
            let color = hour_color(hour);
            Bar::default()
                .value(count)
                .label(Line::from(bar_label(hour, width)))
                .text_value(if count > 0 {
                    count.to_string()
                } else {
                    String::new()
                })
                .style(Style::default().fg(color))
                .value_style(Style::default().bg(color).patch(theme.value))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(width)
        .bar_gap(0)
        .max(histogram.axis_max())
        .label_style(theme.label);

    frame.render_widget(chart, area);
}
