use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};

use dashboard_core::formatting::hour_label;
use dashboard_core::models::HOURS_PER_DAY;

use crate::themes::{hour_color, Theme};

/// Columns needed by the colour bar.
pub const COLORBAR_WIDTH: u16 = 12;

pub const COLORBAR_TITLE: &str = "Hour of Day";

/// Legend lines for the hour palette, thinned out to fit `height` rows.
///
/// The first line is the title; each following line is a swatch and the
/// hour label. When fewer than 24 rows are available every n-th hour is
/// shown, always starting at midnight.
pub fn colorbar_lines(height: u16, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(COLORBAR_TITLE, theme.label))];

    let rows = usize::from(height.saturating_sub(1));
    if rows == 0 {
        return lines;
    }
    let stride = HOURS_PER_DAY.div_ceil(rows).max(1);

    for hour in (0..HOURS_PER_DAY).step_by(stride) {
        let hour = hour as u8;
        lines.push(Line::from(vec![
            Span::styled("██ ", Style::default().fg(hour_color(hour))),
            Span::styled(hour_label(hour), theme.dim),
        ]));
    }
    lines
}

pub fn render_colorbar(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines = colorbar_lines(area.height, theme);
    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_colorbar_full_height_shows_every_hour() {
        let lines = colorbar_lines(25, &Theme::dark());
        assert_eq!(lines.len(), 25);
        assert_eq!(text(&lines[0]), COLORBAR_TITLE);
        assert_eq!(text(&lines[1]), "██ 0:00");
        assert_eq!(text(&lines[24]), "██ 23:00");
    }

    #[test]
    fn test_colorbar_thins_out_when_short() {
        let lines = colorbar_lines(13, &Theme::dark());
        // 12 rows → every 2nd hour.
        assert_eq!(lines.len(), 13);
        assert_eq!(text(&lines[2]), "██ 2:00");
    }

    #[test]
    fn test_colorbar_swatch_uses_palette() {
        let lines = colorbar_lines(25, &Theme::dark());
        assert_eq!(lines[1].spans[0].style.fg, Some(hour_color(0)));
        assert_eq!(lines[24].spans[0].style.fg, Some(hour_color(23)));
    }

    #[test]
    fn test_colorbar_title_only_when_one_row() {
        assert_eq!(colorbar_lines(1, &Theme::dark()).len(), 1);
        assert_eq!(colorbar_lines(0, &Theme::dark()).len(), 1);
    }
}
