use ratatui::style::{Color, Modifier, Style};

/// Colour of each hour of day, from yellow at midnight through green to
/// purple at 23:00. Shared by the histogram bars, the map points and the
/// colour bar so one hour always has one colour.
pub const HOUR_PALETTE: [(u8, u8, u8); 24] = [
    (0xF4, 0xEC, 0x15),
    (0xDA, 0xF0, 0x17),
    (0xBB, 0xEC, 0x19),
    (0x9D, 0xE8, 0x1B),
    (0x80, 0xE4, 0x1D),
    (0x66, 0xE0, 0x1F),
    (0x4C, 0xDC, 0x20),
    (0x34, 0xD8, 0x22),
    (0x24, 0xD2, 0x49),
    (0x25, 0xD0, 0x42),
    (0x26, 0xCC, 0x58),
    (0x28, 0xC8, 0x6D),
    (0x29, 0xC4, 0x81),
    (0x2A, 0xC0, 0x93),
    (0x2B, 0xBC, 0xA4),
    (0x2B, 0xB5, 0xB8),
    (0x2C, 0x99, 0xB4),
    (0x2D, 0x7E, 0xB0),
    (0x2D, 0x65, 0xAC),
    (0x2E, 0x4E, 0xA4),
    (0x2E, 0x38, 0xA4),
    (0x3B, 0x2F, 0xA0),
    (0x4E, 0x2F, 0x9C),
    (0x60, 0x30, 0x99),
];

/// Palette colour for `hour`; hours past 23 wrap around the day.
pub fn hour_color(hour: u8) -> Color {
    let (r, g, b) = HOUR_PALETTE[usize::from(hour) % HOUR_PALETTE.len()];
    Color::Rgb(r, g, b)
}

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are considered dark; 7–15 light. Absent or unparseable values yield
/// `BackgroundType::Dark`.
pub fn detect_background() -> BackgroundType {
    parse_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn parse_colorfgbg(value: Option<&str>) -> BackgroundType {
    match value
        .and_then(|v| v.split(';').next_back())
        .and_then(|bg| bg.parse::<u8>().ok())
    {
        Some(bg) if bg > 6 => BackgroundType::Light,
        _ => BackgroundType::Dark,
    }
}

/// Styles used by the dashboard widgets.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,
    pub warning: Style,

    // ── Panels ───────────────────────────────────────────────────────────────
    pub border: Style,
    pub border_focused: Style,
    /// Background behind the map and histogram.
    pub chart_background: Color,

    // ── Pickers ──────────────────────────────────────────────────────────────
    pub cursor: Style,
    pub checked: Style,
    pub unchecked: Style,

    // ── Map ──────────────────────────────────────────────────────────────────
    /// Colour of the ride currently shown in the details line.
    pub highlight_point: Color,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,
}

impl Theme {
    /// Dark-background theme (default); charts sit on `#323130`.
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            warning: Style::default().fg(Color::Yellow),

            border: Style::default().fg(Color::Rgb(0x6D, 0x6D, 0x6D)),
            border_focused: Style::default().fg(Color::Cyan),
            chart_background: Color::Rgb(0x32, 0x31, 0x30),

            cursor: Style::default().add_modifier(Modifier::REVERSED),
            checked: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            unchecked: Style::default().fg(Color::Gray),

            highlight_point: Color::White,

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            warning: Style::default().fg(Color::Red),

            border: Style::default().fg(Color::Gray),
            border_focused: Style::default().fg(Color::Blue),
            chart_background: Color::Rgb(0xF5, 0xF5, 0xF5),

            cursor: Style::default().add_modifier(Modifier::REVERSED),
            checked: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            unchecked: Style::default().fg(Color::DarkGray),

            highlight_point: Color::Black,

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Plain theme using only the 16 base colours and no bold text.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            separator: Style::default().fg(Color::White),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::White),
            value: Style::default().fg(Color::White),
            warning: Style::default().fg(Color::Yellow),

            border: Style::default().fg(Color::White),
            border_focused: Style::default().fg(Color::Yellow),
            chart_background: Color::Reset,

            cursor: Style::default().add_modifier(Modifier::REVERSED),
            checked: Style::default().fg(Color::Green),
            unchecked: Style::default().fg(Color::White),

            highlight_point: Color::Red,

            table_header: Style::default().fg(Color::Cyan),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name. Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    /// Border style for a panel, brighter when it has keyboard focus.
    pub fn panel_border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_palette_endpoints() {
        assert_eq!(hour_color(0), Color::Rgb(0xF4, 0xEC, 0x15));
        assert_eq!(hour_color(23), Color::Rgb(0x60, 0x30, 0x99));
    }

    #[test]
    fn test_hour_palette_distinct() {
        let mut seen = std::collections::HashSet::new();
        for rgb in HOUR_PALETTE {
            assert!(seen.insert(rgb), "duplicate palette entry {rgb:?}");
        }
    }

    #[test]
    fn test_hour_color_wraps() {
        assert_eq!(hour_color(24), hour_color(0));
    }

    #[test]
    fn test_parse_colorfgbg() {
        assert_eq!(parse_colorfgbg(Some("15;0")), BackgroundType::Dark);
        assert_eq!(parse_colorfgbg(Some("0;15")), BackgroundType::Light);
        assert_eq!(parse_colorfgbg(Some("0;default;7")), BackgroundType::Light);
        assert_eq!(parse_colorfgbg(Some("garbage")), BackgroundType::Dark);
        assert_eq!(parse_colorfgbg(None), BackgroundType::Dark);
    }

    #[test]
    fn test_dark_theme_chart_background() {
        let t = Theme::dark();
        assert_eq!(t.chart_background, Color::Rgb(0x32, 0x31, 0x30));
        assert_eq!(t.border_focused.fg, Some(Color::Cyan));
    }

    #[test]
    fn test_classic_theme_has_no_bold() {
        let t = Theme::classic();
        assert!(!t.header.add_modifier.contains(Modifier::BOLD));
        assert!(!t.value.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("light").header.fg, Some(Color::Blue));
        assert_eq!(Theme::from_name("dark").header.fg, Some(Color::White));
        assert_eq!(Theme::from_name("classic").header.fg, Some(Color::Cyan));
        assert!(Theme::from_name("neon").header.fg.is_some());
    }

    #[test]
    fn test_panel_border() {
        let t = Theme::dark();
        assert_eq!(t.panel_border(true), t.border_focused);
        assert_eq!(t.panel_border(false), t.border);
    }
}
