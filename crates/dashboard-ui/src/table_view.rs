//! Static per-hour table for the `table` view.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per hour of
//! day plus a highlighted totals row at the bottom.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use dashboard_core::formatting::{format_count, format_share, hour_label};
use dashboard_data::histogram::HourHistogram;

use crate::themes::{hour_color, Theme};

/// Data for a single row in the hourly table.
#[derive(Debug, Clone, PartialEq)]
pub struct HourRow {
    pub hour: u8,
    pub rides: u64,
    /// Share of all selected rides, e.g. `"12.5%"`.
    pub share: String,
}

/// One row per hour, including hours without rides.
pub fn hour_rows(histogram: &HourHistogram) -> Vec<HourRow> {
    let total = histogram.total();
    (0u8..)
        .zip(histogram.counts().iter().copied())
        .map(|(hour, rides)| HourRow {
            hour,
            rides,
            share: format_share(rides, total),
        })
        .collect()
}

/// Render the hourly table titled `title` into `area`.
pub fn render_table_view(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    histogram: &HourHistogram,
    theme: &Theme,
) {
    let header_cells = ["", "Hour", "Rides", "Share"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let mut rows: Vec<Row> = hour_rows(histogram)
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(Span::styled(
                    "██",
                    ratatui::style::Style::default().fg(hour_color(row.hour)),
                )),
                Cell::from(hour_label(row.hour)),
                Cell::from(format_count(row.rides)),
                Cell::from(row.share),
            ])
            .style(style)
        })
        .collect();

    let peak = histogram
        .peak_hour()
        .map(|h| format!("peak {}", hour_label(h)))
        .unwrap_or_default();
    rows.push(
        Row::new(vec![
            Cell::from(""),
            Cell::from("TOTAL"),
            Cell::from(format_count(histogram.total())),
            Cell::from(peak),
        ])
        .style(theme.table_total),
    );

    let widths = [
        Constraint::Length(3),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border)
                .title(format!(" {title} ")),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a placeholder when the selection matches no rides.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No rides match the current selection",
            theme.warning,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Try other --years / --months, or --all.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Ride Dashboard "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
