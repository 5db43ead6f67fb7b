//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Three entry points feed
//! the matcher, each producing a fresh result set: a query-bar edit, a pill
//! activation, and the one-shot startup query.

use crate::{
    commands::Command,
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        help::HelpPopup,
        pill_strip::{PillStrip, PillStripState},
        query_bar::{QueryBar, QueryBarState},
        results::{ResultList, ResultListState},
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use postfind_core::{config::Config, corpus, link, Post};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::{io, time::Duration};
use url::Url;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Pills,
    Results,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub pills: PillStripState,
    pub results: ResultListState,
    pub query: QueryBarState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    /// Site base URL that share links are built from, when one is known.
    pub share_base: Option<Url>,
    /// Share link of the last pill activation, shown on the status line.
    pub share_link: Option<Url>,
    /// Startup query from `--query`/`--link`, applied once after the first
    /// frame has been drawn.
    pub pending_query: Option<String>,
    pub quit: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(
        posts: Vec<Post>,
        config: Config,
        theme: Theme,
        share_base: Option<Url>,
        startup_query: Option<String>,
    ) -> Self {
        // Configured topics win; otherwise derive pills from the corpus.
        let terms = if config.pills.topics.is_empty() {
            corpus::top_tags(&posts, config.ui.pill_count)
        } else {
            config.pills.topics.clone()
        };
        let pills = PillStripState::new(terms);

        let results = ResultListState::new(posts, config.ui.show_excerpts);

        let state = AppState {
            pills,
            results,
            query: QueryBarState::default(),
            focus: Focus::Pills,
            prev_focus: Focus::Pills,
            theme,
            show_help: false,
            command_bar: CommandBarState::default(),
            share_base,
            share_link: None,
            pending_query: startup_query,
            quit: false,
        };

        App { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on
    /// exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            // The startup query replays only once the widgets have drawn,
            // so the first visible frame is the initialized, empty shell.
            self.apply_startup_query();

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(
                                focus = ?self.state.focus,
                                event = ?ev,
                                "key event"
                            );
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Apply the startup query, if one is still pending. Idempotent — the
    /// query is taken on the first call and every later call is a no-op.
    pub fn apply_startup_query(&mut self) {
        if let Some(q) = self.state.pending_query.take() {
            tracing::debug!(query = %q, "applying startup query");
            self.state.query.set_text(&q);
            run_search(&mut self.state);
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                AppEvent::Enter => {
                    let input = s.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                            execute_command(s, cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            // Empty input — just close
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                        }
                        Err(msg) => {
                            // Show the error; bar stays open
                            s.command_bar.error = Some(msg);
                        }
                    }
                }
                other => s.command_bar.handle(&other),
            }
            return;
        }

        match event {
            // Toggle help (only when not typing in the query bar)
            AppEvent::Char('?') if s.focus != Focus::QueryBar => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            // Enter command mode with `:` (not from the query bar)
            AppEvent::Char(':') if s.focus != Focus::QueryBar => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            // Return focus from the query bar
            AppEvent::Escape => {
                if s.focus == Focus::QueryBar {
                    tracing::debug!("focus: QueryBar -> Pills");
                    s.focus = Focus::Pills;
                }
            }

            // Tab-cycle focus: Pills → Results → QueryBar → Pills
            AppEvent::FocusNext => {
                let next = match s.focus {
                    Focus::Pills => Focus::Results,
                    Focus::Results => Focus::QueryBar,
                    Focus::QueryBar | Focus::Command => Focus::Pills,
                };
                tracing::debug!(from = ?s.focus, to = ?next, "focus cycle");
                s.focus = next;
            }

            // Jump to query bar
            AppEvent::QueryFocus => {
                tracing::debug!("focus -> QueryBar");
                s.focus = Focus::QueryBar;
            }

            // Enter activates the selected pill or confirms the query
            AppEvent::Enter => match s.focus {
                Focus::Pills => activate_pill(s),
                Focus::QueryBar => {
                    tracing::debug!("focus: QueryBar -> Results");
                    s.focus = Focus::Results;
                }
                _ => {}
            },

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch_to_focused(s, other),
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::QueryBar | Focus::Command)
}

/// Re-run the matcher against the query bar's current text.
fn run_search(s: &mut AppState) {
    let query = s.query.text.clone();
    s.results.run_query(&query);
}

/// Activate the pill under the selection cursor: mirror its term into the
/// query bar, execute the search, mark the pill exclusively active, write
/// the term into the share link, and hand focus to the query bar.
fn activate_pill(s: &mut AppState) {
    let Some(term) = s.pills.selected_term().map(str::to_string) else {
        return;
    };
    s.query.set_text(&term);
    run_search(s);
    s.pills.activate(s.pills.cursor);
    if let Some(base) = &s.share_base {
        s.share_link = Some(link::search_link(base, &term));
    }
    s.focus = Focus::QueryBar;
}

/// Execute a parsed [`Command`] against the application state.
fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = match name.to_ascii_lowercase().as_str() {
                "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Theme::load_gruvbox_dark(),
                _ => Theme::load_default(),
            };
        }
        Command::Excerpts => {
            s.results.show_excerpts = !s.results.show_excerpts;
        }
        Command::Top => {
            s.results.handle(&AppEvent::ScrollToStart);
        }
        Command::Clear => {
            s.query.set_text("");
            s.results.clear();
            s.pills.deactivate();
            s.share_link = None;
        }
    }
}

/// Route an event to the widget that owns the current focus. Query-bar
/// edits that change the text re-run the search immediately, so the result
/// list always reflects the visible input.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    match s.focus {
        Focus::Pills => s.pills.handle(&event),
        Focus::Results => s.results.handle(&event),
        Focus::QueryBar => {
            let before = s.query.text.clone();
            s.query.handle(&event);
            if s.query.text != before {
                run_search(s);
            }
        }
        Focus::Command => {} // handled before dispatch, should not reach here
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line pill strip | results | 3-line query bar | status row
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        PillStrip::new(&state.pills, state.focus == Focus::Pills, &state.theme),
        vert[0],
    );
    frame.render_widget(
        ResultList::new(&state.results, state.focus == Focus::Results, &state.theme),
        vert[1],
    );
    frame.render_widget(
        QueryBar::new(&state.query, state.focus == Focus::QueryBar, &state.theme),
        vert[2],
    );
    frame.render_widget(Paragraph::new(status_line(state, vert[3].width)), vert[3]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the status row
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom() - 1, height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return; // cursor is set; skip query-bar cursor below
    }

    // Position the terminal cursor when the query bar is focused
    if state.focus == Focus::QueryBar {
        let qb = QueryBar::new(&state.query, true, &state.theme);
        let (cx, cy) = qb.cursor_position(vert[2]);
        frame.set_cursor_position((cx, cy));
    }
}

/// One-line status: match count on the left, share link on the right.
fn status_line(state: &AppState, width: u16) -> Line<'static> {
    let left = if state.results.last_query.trim().is_empty() {
        format!(" {} posts", state.results.corpus.len())
    } else {
        format!(" {} matches", state.results.hits.len())
    };

    let right = state
        .share_link
        .as_ref()
        .map(|link| format!("{link} "))
        .unwrap_or_default();

    let pad = (width as usize).saturating_sub(left.chars().count() + right.chars().count());
    Line::from(vec![
        Span::styled(left, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(pad)),
        Span::styled(right, Style::default().add_modifier(Modifier::DIM)),
    ])
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}
