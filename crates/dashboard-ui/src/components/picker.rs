//! Multi-select picker used for the year and month controls.

use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::themes::Theme;

/// One entry of a picker.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerOption {
    pub label: String,
    pub checked: bool,
}

/// Cursor position inside a picker's option list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickerState {
    cursor: usize,
}

impl PickerState {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move down, stopping on the last of `len` options.
    pub fn move_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    /// First option index visible in a window `height` rows tall so that the
    /// cursor stays on screen.
    pub fn offset(&self, height: usize) -> usize {
        if height == 0 {
            return self.cursor;
        }
        self.cursor.saturating_sub(height - 1)
    }
}

/// Build the visible lines of a picker: `[x] label` per option, the cursor
/// row highlighted when the picker has focus.
pub fn picker_lines<'a>(
    options: &[PickerOption],
    state: &PickerState,
    height: usize,
    focused: bool,
    theme: &'a Theme,
) -> Vec<Line<'a>> {
    let offset = state.offset(height);
    options
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, opt)| {
            let (mark, style) = if opt.checked {
                ("[x] ", theme.checked)
            } else {
                ("[ ] ", theme.unchecked)
            };
            let style = if focused && i == state.cursor() {
                style.patch(theme.cursor)
            } else {
                style
            };
            Line::from(vec![
                Span::styled(mark, style),
                Span::styled(opt.label.clone(), style),
            ])
        })
        .collect()
}

/// Render a bordered picker titled `title` into `area`.
pub fn render_picker(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    options: &[PickerOption],
    state: &PickerState,
    focused: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border(focused))
        .title(format!(" {title} "));
    let inner_height = usize::from(block.inner(area).height);

    let lines = if options.is_empty() {
        vec![Line::from(Span::styled("no options", theme.dim))]
    } else {
        picker_lines(options, state, inner_height, focused, theme)
    };

    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}
