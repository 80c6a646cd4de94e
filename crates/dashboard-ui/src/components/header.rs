use std::borrow::Cow;

use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use dashboard_core::formatting::format_count;

use crate::themes::Theme;

/// Title shown at the top of the control column.
pub const TITLE: &str = "RIDE DATA APP";

/// Header block rendered at the top of the control column.
pub struct Header<'a> {
    /// Short description of where the rides came from.
    pub source: &'a str,
    /// Number of rides in the whole dataset.
    pub total_loaded: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(source: &'a str, total_loaded: usize, theme: &'a Theme) -> Self {
        Self {
            source,
            total_loaded,
            theme,
        }
    }

    /// Title, a separator `width` columns wide, the source line and the
    /// picker prompt.
    pub fn to_lines(&self, width: u16) -> Vec<Line<'a>> {
        let rides = format!("{} rides", format_count(self.total_loaded as u64));
        // "[ " + rides + " | " + source + " ]"
        let room = usize::from(width).saturating_sub(rides.width() + 7);
        vec![
            Line::from(Span::styled(TITLE, self.theme.header)),
            Line::from(Span::styled(
                "=".repeat(usize::from(width)),
                self.theme.separator,
            )),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(rides, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(truncate_start(self.source, room), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
            Line::from(Span::styled("Select year and/or month:", self.theme.label)),
        ]
    }
}

/// Shorten `text` to at most `max` columns, keeping its end and marking the
/// cut with `…`.
pub fn truncate_start(text: &str, max: usize) -> Cow<'_, str> {
    if text.width() <= max {
        return Cow::Borrowed(text);
    }
    if max == 0 {
        return Cow::Borrowed("");
    }

    let mut kept = Vec::new();
    let mut used = 1;
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        kept.push(c);
    }

    let mut out = String::from("…");
    out.extend(kept.into_iter().rev());
    Cow::Owned(out)
}
