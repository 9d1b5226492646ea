//! Monitor TUI Application
//!
//! The main application struct and event loop for the monitor command.

use crate::countdown::EtaTicker;
use crate::error::Result;
use crate::grid::{
    render_grid, Cell, CellKind, FailedTestDisplay, GridView, TaskBox, VersionHeader,
    NO_BUILDS_MESSAGE,
};
use crate::model::Snapshot;
use crate::query::waterfall_base;
use crate::status::StatusCategory;
use crate::timefmt::Timezone;
use crate::view_state::{PageControls, ViewState};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::collections::HashMap;
use std::io::{self, Stdout};
use std::time::Duration;

/// Keyboard focus of the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing into the build variant filter.
    VariantFilter,
    /// Typing into the task filter.
    TaskFilter,
}

/// Ratatui color for a status category.
fn category_color(category: StatusCategory) -> Color {
    match category {
        StatusCategory::Success => Color::Green,
        StatusCategory::Failed => Color::Red,
        StatusCategory::SystemFailed => Color::Magenta,
        StatusCategory::Started | StatusCategory::Dispatched => Color::Cyan,
        StatusCategory::Unstarted => Color::Yellow,
        StatusCategory::Undispatched => Color::DarkGray,
        StatusCategory::Inactive | StatusCategory::None => Color::DarkGray,
    }
}

/// The tasks a cell displays, if any.
fn cell_tasks(cell: &Cell) -> &[TaskBox] {
    match &cell.kind {
        CellKind::Active { tasks } => tasks,
        CellKind::Collapsed { active_tasks, .. } => active_tasks,
        _ => &[],
    }
}

/// The main monitor application state.
pub struct WaterfallApp {
    snapshot: Snapshot,
    state: ViewState,
    tz: Timezone,
    /// Render model for the current view state.
    grid: GridView,
    controls: PageControls,
    /// One live countdown per started task on screen, keyed by task id.
    tickers: HashMap<String, EtaTicker>,
    input_mode: InputMode,
    selected_row: usize,
    selected_col: usize,
    should_quit: bool,
}

impl WaterfallApp {
    pub fn new(snapshot: Snapshot, mut state: ViewState, tz: Timezone) -> Self {
        state.set_skip_from_data(snapshot.current_skip);
        let grid = render_grid(&snapshot, &state, tz);
        let controls = state.page_controls(&snapshot);
        let mut app = Self {
            snapshot,
            state,
            tz,
            grid,
            controls,
            tickers: HashMap::new(),
            input_mode: InputMode::Normal,
            selected_row: 0,
            selected_col: 0,
            should_quit: false,
        };
        app.sync_tickers();
        app
    }

    /// Re-render the grid after a view-state change.
    fn rebuild(&mut self) {
        self.grid = render_grid(&self.snapshot, &self.state, self.tz);
        self.controls = self.state.page_controls(&self.snapshot);
        self.clamp_selection();
        self.sync_tickers();
    }

    /// Keep exactly one ticker per started task currently on screen.
    /// Tickers for tasks that left the view are dropped, which cancels
    /// their timer threads.
    fn sync_tickers(&mut self) {
        let mut wanted: HashMap<String, i64> = HashMap::new();
        for row in &self.grid.rows {
            for cell in &row.cells {
                for task in cell_tasks(cell) {
                    if let Some(nanos) = task.eta_nanos {
                        wanted.insert(task.task_id.clone(), nanos);
                    }
                }
            }
        }

        self.tickers.retain(|task_id, _| wanted.contains_key(task_id));
        for (task_id, nanos) in wanted {
            self.tickers
                .entry(task_id)
                .or_insert_with(|| EtaTicker::new(nanos));
        }
    }

    /// Live ETA label for a task box, preferring the running ticker over
    /// the static label captured at render time.
    fn eta_label_for(&self, task: &TaskBox) -> Option<String> {
        task.eta_nanos?;
        match self.tickers.get(&task.task_id) {
            Some(ticker) => Some(ticker.eta_label()),
            None => task.tooltip.eta.clone(),
        }
    }

    fn clamp_selection(&mut self) {
        self.selected_row = self.selected_row.min(self.grid.rows.len().saturating_sub(1));
        self.selected_col = self
            .selected_col
            .min(self.grid.headers.len().saturating_sub(1));
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: KeyCode) {
        match self.input_mode {
            InputMode::VariantFilter => self.handle_filter_key(key, true),
            InputMode::TaskFilter => self.handle_filter_key(key, false),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('c') => {
                self.state.toggle_collapsed();
                self.rebuild();
            }
            KeyCode::Char('m') => {
                self.state.toggle_shorten_commit_message();
                self.rebuild();
            }
            KeyCode::Char('/') => {
                self.input_mode = InputMode::VariantFilter;
            }
            // The task filter only applies to the expanded view.
            KeyCode::Char('t') => {
                if !self.state.collapsed() {
                    self.input_mode = InputMode::TaskFilter;
                }
            }
            KeyCode::Char('n') => {
                if self.controls.next_enabled {
                    let skip = self.controls.next_skip;
                    self.state.set_skip(skip);
                    self.rebuild();
                }
            }
            KeyCode::Char('p') => {
                if self.controls.prev_enabled {
                    let skip = self.controls.prev_skip.max(0);
                    self.state.set_skip(skip);
                    self.rebuild();
                }
            }
            KeyCode::Up => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_row + 1 < self.grid.rows.len() {
                    self.selected_row += 1;
                }
            }
            KeyCode::Left => {
                self.selected_col = self.selected_col.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_col + 1 < self.grid.headers.len() {
                    self.selected_col += 1;
                }
            }
            _ => {}
        }
    }

    /// Filter editing: every keystroke applies immediately, mirroring the
    /// original page's behavior of filtering as the user types.
    fn handle_filter_key(&mut self, key: KeyCode, variant: bool) {
        let current = if variant {
            self.state.build_variant_filter().to_string()
        } else {
            self.state.task_filter().to_string()
        };

        match key {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                let mut filter = current;
                filter.pop();
                self.apply_filter(&filter, variant);
            }
            KeyCode::Char(ch) => {
                let mut filter = current;
                filter.push(ch);
                self.apply_filter(&filter, variant);
            }
            _ => {}
        }
    }

    fn apply_filter(&mut self, filter: &str, variant: bool) {
        if variant {
            self.state.set_build_variant_filter(filter);
        } else {
            self.state.set_task_filter(filter);
        }
        self.rebuild();
    }

    /// Render the UI to the terminal.
    pub fn render(&self, frame: &mut Frame) {
        let header_height = (self.grid.headers.len() as u16 + 2).min(8);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),             // Title + URL
                Constraint::Length(header_height), // Version headers
                Constraint::Min(0),                // Grid
                Constraint::Length(8),             // Selected cell detail
                Constraint::Length(1),             // Footer
            ])
            .split(frame.area());

        self.render_title(frame, chunks[0]);
        self.render_headers(frame, chunks[1]);
        self.render_grid(frame, chunks[2]);
        self.render_detail(frame, chunks[3]);
        self.render_footer(frame, chunks[4]);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let base = waterfall_base(&self.grid.project);
        let url = self.state.query_params().href(&base);
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} ", self.grid.project),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(url, Style::default().fg(Color::DarkGray)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" waterfall monitor "),
        );
        frame.render_widget(title, area);
    }

    fn render_headers(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .grid
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let marker = if i == self.selected_col { "▶ " } else { "  " };
                match header {
                    VersionHeader::Active {
                        commit,
                        author,
                        message,
                        formatted_time,
                        ..
                    } => Line::from(vec![
                        Span::styled(marker, Style::default().fg(Color::Cyan)),
                        Span::styled(commit.clone(), Style::default().fg(Color::Cyan)),
                        Span::raw(format!(" {} ", formatted_time)),
                        Span::styled(
                            author.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(format!(" - {}", message)),
                    ]),
                    VersionHeader::RolledUp { title, .. } => Line::from(vec![
                        Span::styled(marker, Style::default().fg(Color::Cyan)),
                        Span::styled(title.clone(), Style::default().fg(Color::DarkGray)),
                    ]),
                }
            })
            .collect();

        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Versions "));
        frame.render_widget(paragraph, area);
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect) {
        if self.grid.no_builds {
            let message = Paragraph::new(NO_BUILDS_MESSAGE)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Builds "));
            frame.render_widget(message, area);
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        for (row_idx, row) in self.grid.rows.iter().enumerate() {
            let selected_row = row_idx == self.selected_row;
            let name_style = if selected_row {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            let mut spans = vec![Span::styled(format!("{:<24} ", row.variant_name), name_style)];
            for (col_idx, cell) in row.cells.iter().enumerate() {
                let selected = selected_row && col_idx == self.selected_col;
                spans.extend(self.cell_spans(cell, selected));
                spans.push(Span::raw("  "));
            }
            lines.push(Line::from(spans));
        }

        let title = format!(" Builds ({}) ", self.grid.rows.len());
        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
    }

    fn cell_spans(&self, cell: &Cell, selected: bool) -> Vec<Span<'static>> {
        let bracket_style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut spans = vec![Span::styled("[", bracket_style)];
        match &cell.kind {
            CellKind::RolledUp => {
                spans.push(Span::styled(
                    "inactive",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            CellKind::Missing => {
                spans.push(Span::styled("-", Style::default().fg(Color::DarkGray)));
            }
            CellKind::Collapsed {
                segments,
                active_tasks,
            } => {
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::raw(" "));
                    }
                    spans.push(Span::styled(
                        format!("{} {}", segment.count, segment.category),
                        Style::default().fg(category_color(segment.category)),
                    ));
                }
                if !active_tasks.is_empty() {
                    if !segments.is_empty() {
                        spans.push(Span::raw(" "));
                    }
                    spans.extend(task_box_spans(active_tasks));
                }
            }
            CellKind::Active { tasks } => {
                spans.extend(task_box_spans(tasks));
            }
        }
        spans.push(Span::styled("]", bracket_style));
        spans
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Tasks ");

        let cell = self
            .grid
            .rows
            .get(self.selected_row)
            .and_then(|row| row.cells.get(self.selected_col));

        let mut lines: Vec<Line> = Vec::new();
        if let Some(cell) = cell {
            for task in cell_tasks(cell) {
                let mut spans = vec![
                    Span::styled("■ ", Style::default().fg(category_color(task.category))),
                    Span::raw(task.tooltip.top_line.clone()),
                ];
                if let Some(eta) = self.eta_label_for(task) {
                    spans.push(Span::styled(
                        format!("  ETA: {}", eta),
                        Style::default().fg(Color::Cyan),
                    ));
                }
                lines.push(Line::from(spans));

                match &task.tooltip.failed_tests {
                    FailedTestDisplay::Names(names) => {
                        for name in names {
                            lines.push(Line::from(Span::styled(
                                format!("    ✗ {}", name),
                                Style::default().fg(Color::Red),
                            )));
                        }
                    }
                    FailedTestDisplay::Count(count) => {
                        lines.push(Line::from(Span::styled(
                            format!("    ✗ {} failed tests", count),
                            Style::default().fg(Color::Red),
                        )));
                    }
                    FailedTestDisplay::None => {}
                }
            }
        }
        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "No tasks in the selected cell",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let mode = match self.input_mode {
            InputMode::Normal => String::new(),
            InputMode::VariantFilter => {
                format!(" variant filter: {}▏", self.state.build_variant_filter())
            }
            InputMode::TaskFilter => format!(" task filter: {}▏", self.state.task_filter()),
        };

        let paging = format!(
            " newer:{} older:{}",
            if self.controls.prev_enabled { "p" } else { "-" },
            if self.controls.next_enabled { "n" } else { "-" },
        );

        let footer = Paragraph::new(Line::from(vec![
            Span::styled(
                " q quit  c collapse  / variant  t task  m message ",
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(paging, Style::default().fg(Color::DarkGray)),
            Span::styled(mode, Style::default().fg(Color::Yellow)),
        ]));
        frame.render_widget(footer, area);
    }
}

/// Initialize the terminal for TUI mode.
pub fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
pub fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn task_box_spans(tasks: &[TaskBox]) -> Vec<Span<'static>> {
    tasks
        .iter()
        .map(|task| {
            Span::styled("■", Style::default().fg(category_color(task.category)))
        })
        .collect()
}

/// Run the monitor TUI application.
///
/// Initializes the terminal, runs the event loop on a steady redraw tick
/// (so ETA countdowns stay live), and restores the terminal on exit. All
/// tickers are cancelled when the app drops.
pub fn run_monitor(
    snapshot: Snapshot,
    state: ViewState,
    tz: Timezone,
    poll_interval_secs: u64,
) -> Result<()> {
    // Set up panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = init_terminal()?;
    let mut app = WaterfallApp::new(snapshot, state, tz);

    let poll_duration = Duration::from_secs(poll_interval_secs.max(1));

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release or repeat)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}
