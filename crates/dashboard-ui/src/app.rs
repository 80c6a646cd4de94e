//! Main application state and TUI event loop for the ride dashboard.
//!
//! [`App`] owns the theme, the picker state and the controller that turns
//! the current [`Selection`] into a [`DashboardSnapshot`]. Every key press
//! that changes the selection is picked up on the next draw, which asks the
//! controller for a fresh snapshot.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

use futures::{Stream, StreamExt};

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::formatting::{format_count, month_name, selection_summary};
use dashboard_core::models::{Selection, MONTHS};
use dashboard_data::map::{MapPoint, MapView};
use dashboard_runtime::controller::{DashboardController, DashboardSnapshot};

use crate::components::header::Header;
use crate::components::picker::{render_picker, PickerOption, PickerState};
use crate::histogram_view::{self, HISTOGRAM_HINT};
use crate::map_view;
use crate::table_view;
use crate::themes::Theme;

/// Width of the control column.
const CONTROL_WIDTH: u16 = 36;

/// Redraw interval while no input arrives.
const TICK_RATE: Duration = Duration::from_millis(250);

const KEY_HELP: &str =
    "Tab focus · Space toggle · c/a clear · n/p ride · +/- zoom · hjkl pan · f fit · r reset · q quit";

// ── ViewMode / Focus ──────────────────────────────────────────────────────────

/// Which screen the TUI renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Pickers, map and histogram.
    Dashboard,
    /// Static per-hour table for the initial selection.
    Table,
}

/// Panel that receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Years,
    Months,
    Map,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Years => Focus::Months,
            Focus::Months => Focus::Map,
            Focus::Map => Focus::Years,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Years => Focus::Map,
            Focus::Months => Focus::Years,
            Focus::Map => Focus::Months,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the ride dashboard TUI.
pub struct App {
    pub theme: Theme,
    pub view_mode: ViewMode,
    /// Where the rides were loaded from, shown in the header.
    pub source: String,
    /// Current state of both pickers.
    pub selection: Selection,
    pub focus: Focus,
    pub map_view: MapView,
    /// Index into the snapshot's map points of the ride shown in the
    /// details line.
    pub detail: Option<usize>,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    controller: DashboardController,
    year_options: Vec<u16>,
    year_picker: PickerState,
    month_picker: PickerState,
}

impl App {
    /// Construct a new application.
    ///
    /// The year picker offers every year in the dataset plus any year in
    /// `selection` the data does not contain, so it can be unticked.
    pub fn new(
        theme_name: &str,
        view_mode: ViewMode,
        controller: DashboardController,
        selection: Selection,
        map_view: MapView,
        source: String,
    ) -> Self {
        let mut year_options = controller.dataset().years();
        year_options.extend(selection.years.iter().copied());
        year_options.sort_unstable();
        year_options.dedup();

        Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            source,
            selection,
            focus: Focus::Years,
            map_view,
            detail: None,
            should_quit: false,
            controller,
            year_options,
            year_picker: PickerState::default(),
            month_picker: PickerState::default(),
        }
    }

    /// Snapshot for the current selection.
    pub fn snapshot(&mut self) -> &DashboardSnapshot {
        self.controller.update(&self.selection)
    }

    pub fn year_options(&self) -> &[u16] {
        &self.year_options
    }

    // ── Public event loops ────────────────────────────────────────────────────

    /// Run the interactive dashboard until `q` / `Ctrl+C`.
    pub async fn run_dashboard(self) -> Result<()> {
        self.run().await
    }

    /// Run the static hourly table, then wait for `q` / `Ctrl+C`.
    pub async fn run_table(self) -> Result<()> {
        self.run().await
    }

    async fn run(mut self) -> Result<()> {
        let mut terminal = enter_terminal().map_err(terminal_error)?;
        let result = self.event_loop(&mut terminal, EventStream::new()).await;

        // Restore terminal state unconditionally.
        leave_terminal(&mut terminal).map_err(terminal_error)?;
        result
    }

    /// Draw, then wait for the next terminal event or the next tick.
    ///
    /// Returns when a quit key is pressed or `events` ends. The future stays
    /// pending between events and ticks.
    pub async fn event_loop<B, S>(&mut self, terminal: &mut Terminal<B>, mut events: S) -> Result<()>
    where
        B: Backend,
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        let mut tick = tokio::time::interval(TICK_RATE);

        loop {
            terminal
                .draw(|frame| self.draw(frame))
                .map_err(terminal_error)?;

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) => self.handle_key(key),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(terminal_error(e)),
                    None => return Ok(()),
                },
                _ = tick.tick() => {}
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if is_quit_key(&key) {
            self.should_quit = true;
            return;
        }
        // The table is fixed to the selection it was opened with.
        if self.view_mode == ViewMode::Table {
            return;
        }

        match key.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Char('a') => {
                self.selection.clear();
                self.selection_changed();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.map_view.zoom_in(),
            KeyCode::Char('-') => self.map_view.zoom_out(),
            KeyCode::Char('r') => self.map_view.reset(),
            KeyCode::Char('f') => self.fit_map(),
            KeyCode::Char('n') => self.step_detail(true),
            KeyCode::Char('p') => self.step_detail(false),
            KeyCode::Esc => self.detail = None,
            code => match self.focus {
                Focus::Years | Focus::Months => self.handle_picker_key(code),
                Focus::Map => self.handle_map_key(code),
            },
        }
    }

    fn handle_picker_key(&mut self, code: KeyCode) {
        let len = self.focused_option_count();
        let picker = match self.focus {
            Focus::Years => &mut self.year_picker,
            _ => &mut self.month_picker,
        };

        match code {
            KeyCode::Up | KeyCode::Char('k') => picker.move_up(),
            KeyCode::Down | KeyCode::Char('j') => picker.move_down(len),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_at_cursor(),
            KeyCode::Char('c') => {
                match self.focus {
                    Focus::Years => self.selection.years.clear(),
                    _ => self.selection.months.clear(),
                }
                self.selection_changed();
            }
            _ => {}
        }
    }

    fn handle_map_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('h') => self.map_view.pan(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.map_view.pan(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.map_view.pan(0, 1),
            KeyCode::Down | KeyCode::Char('j') => self.map_view.pan(0, -1),
            _ => {}
        }
    }

    fn focused_option_count(&self) -> usize {
        match self.focus {
            Focus::Years => self.year_options.len(),
            _ => MONTHS.count(),
        }
    }

    fn toggle_at_cursor(&mut self) {
        match self.focus {
            Focus::Years => {
                if let Some(&year) = self.year_options.get(self.year_picker.cursor()) {
                    self.selection.toggle_year(year);
                    self.selection_changed();
                }
            }
            Focus::Months => {
                // Cursor 0 is January.
                if let Ok(month) = u8::try_from(self.month_picker.cursor() + 1) {
                    if MONTHS.contains(&month) {
                        self.selection.toggle_month(month);
                        self.selection_changed();
                    }
                }
            }
            Focus::Map => {}
        }
    }

    fn selection_changed(&mut self) {
        self.detail = None;
        tracing::debug!(summary = %selection_summary(&self.selection), "selection changed");
    }

    /// Move the details cursor through the matching rides, wrapping around.
    fn step_detail(&mut self, forward: bool) {
        let len = self.snapshot().map.len();
        if len == 0 {
            self.detail = None;
            return;
        }
        self.detail = Some(match (self.detail, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        });
    }

    /// Centre the map on the matching rides.
    fn fit_map(&mut self) {
        if let Some(bounds) = self.snapshot().map.bounds() {
            self.map_view.center_on(&bounds);
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current state into `frame`.
    pub fn draw(&mut self, frame: &mut Frame) {
        self.controller.update(&self.selection);
        let Some(snapshot) = self.controller.current() else {
            return;
        };

        let area = frame.area();
        match self.view_mode {
            ViewMode::Dashboard => self.render_dashboard(frame, area, snapshot),
            ViewMode::Table => {
                if snapshot.total_rides == 0 {
                    table_view::render_no_data(frame, area, &self.theme);
                } else {
                    let title = format!("Rides by hour | {}", selection_summary(&self.selection));
                    table_view::render_table_view(
                        frame,
                        area,
                        &title,
                        &snapshot.histogram,
                        &self.theme,
                    );
                }
            }
        }
    }

    fn render_dashboard(&self, frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(CONTROL_WIDTH), Constraint::Min(40)])
            .split(area);

        self.render_controls(frame, columns[0], snapshot);
        self.render_charts(frame, columns[1], snapshot);
    }

    fn render_controls(&self, frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
        let year_height = (self.year_options.len() as u16 + 2).clamp(3, 8);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(year_height),
                Constraint::Length(MONTHS.count() as u16 + 2),
                Constraint::Min(6),
            ])
            .split(area);

        let header = Header::new(&self.source, self.controller.dataset().len(), &self.theme);
        frame.render_widget(
            Paragraph::new(Text::from(header.to_lines(area.width))),
            rows[0],
        );

        let year_opts: Vec<PickerOption> = self
            .year_options
            .iter()
            .map(|y| PickerOption {
                label: y.to_string(),
                checked: self.selection.years.contains(y),
            })
            .collect();
        render_picker(
            frame,
            rows[1],
            "Year",
            &year_opts,
            &self.year_picker,
            self.focus == Focus::Years,
            &self.theme,
        );

        let month_opts: Vec<PickerOption> = MONTHS
            .map(|m| PickerOption {
                label: format!("{m:>2} {}", month_name(m).unwrap_or_default()),
                checked: self.selection.months.contains(&m),
            })
            .collect();
        render_picker(
            frame,
            rows[2],
            "Month",
            &month_opts,
            &self.month_picker,
            self.focus == Focus::Months,
            &self.theme,
        );

        let mut lines = vec![
            Line::from(Span::styled(snapshot.total_label(), self.theme.value)),
            Line::from(Span::styled(
                selection_summary(&self.selection),
                self.theme.label,
            )),
            Line::from(""),
        ];
        if let Some(point) = self.detail_point(snapshot) {
            lines.push(Line::from(Span::styled(
                format!(
                    "Ride {}/{} at {}:00",
                    self.detail.map_or(0, |i| i + 1),
                    format_count(snapshot.map.len() as u64),
                    point.hour
                ),
                self.theme.label,
            )));
            lines.push(Line::from(Span::styled(point.label.clone(), self.theme.text)));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(KEY_HELP, self.theme.dim)));

        frame.render_widget(
            Paragraph::new(Text::from(lines))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::TOP).border_style(self.theme.separator)),
            rows[3],
        );
    }

    fn render_charts(&self, frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(60),
                Constraint::Length(1),
                Constraint::Min(6),
            ])
            .split(area);

        map_view::render_map(
            frame,
            rows[0],
            &snapshot.map,
            &self.map_view,
            self.detail_point(snapshot),
            self.focus == Focus::Map,
            &self.theme,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(HISTOGRAM_HINT, self.theme.dim)),
            rows[1],
        );
        histogram_view::render_histogram(frame, rows[2], &snapshot.histogram, &self.theme);
    }

    fn detail_point<'s>(&self, snapshot: &'s DashboardSnapshot) -> Option<&'s MapPoint> {
        self.detail.and_then(|i| snapshot.map.points().get(i))
    }
}

// ── Terminal helpers ──────────────────────────────────────────────────────────

fn terminal_error(e: impl std::fmt::Display) -> DashboardError {
    DashboardError::Terminal(e.to_string())
}

fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn enter_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn leave_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    restore_terminal()?;
    terminal.show_cursor()?;
    Ok(())
}

/// Leave raw mode and the alternate screen.
///
/// Called by the event loops on exit, and by the binary when the loop is
/// cancelled before it can clean up.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen, crossterm::cursor::Show)?;
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
