//! Result list widget — the scrollable pane of matched posts.
//!
//! Each result renders from a fixed template: a link-styled title line with
//! the target URL alongside, a `date • tags` meta line, and an excerpt
//! paragraph. The generator HTML-escapes ampersands in title and excerpt
//! text, so the literal `&amp;` entity is un-escaped at render time; every
//! other character passes through unmodified.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one result |
//! | `↓` / `j` | Move cursor down one result |
//! | `PageUp` / `Ctrl+u` | Scroll up one page |
//! | `PageDown` / `Ctrl+d` | Scroll down one page |
//! | `g` / `G` | Jump to the first / last result |
//!
//! # Scroll semantics
//!
//! `offset` = index of the first visible hit (0 = top; best matches sit at
//! the top because output keeps corpus order). `cursor` = index of the
//! highlighted hit. The cursor is always kept within the visible window;
//! moving it past the edge scrolls the window.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use postfind_core::{search, Post};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// A stored match: corpus index plus the informational field-priority
/// weight. The post itself stays in the corpus owned by the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultHit {
    pub index: usize,
    pub priority: u8,
}

pub struct ResultListState {
    /// The full corpus, loaded once and never mutated.
    pub corpus: Vec<Post>,
    /// Matches of the last executed query, in corpus order.
    pub hits: Vec<ResultHit>,
    /// The last executed query. Decides between the idle hint and the
    /// "No results found" indicator when `hits` is empty.
    pub last_query: String,
    /// Index into `hits` of the highlighted result.
    pub cursor: usize,
    /// Index into `hits` of the first visible result.
    pub offset: usize,
    /// Whether excerpt paragraphs are rendered.
    pub show_excerpts: bool,
    /// Cached from the last render so `handle()` can do cursor-aware
    /// scrolling.
    last_height: Cell<usize>,
}

impl ResultListState {
    pub fn new(corpus: Vec<Post>, show_excerpts: bool) -> Self {
        Self {
            corpus,
            hits: Vec::new(),
            last_query: String::new(),
            cursor: 0,
            offset: 0,
            show_excerpts,
            last_height: Cell::new(40),
        }
    }

    /// Re-run the matcher and replace the result set. The previous result
    /// set is discarded wholesale; cursor and scroll reset to the top.
    pub fn run_query(&mut self, query: &str) {
        let hits: Vec<ResultHit> = search::search(query, &self.corpus)
            .iter()
            .map(|hit| ResultHit {
                index: hit.index,
                priority: hit.priority,
            })
            .collect();
        self.hits = hits;
        self.last_query = query.to_string();
        self.cursor = 0;
        self.offset = 0;
    }

    /// Reset to the initial "no query" state.
    pub fn clear(&mut self) {
        self.hits.clear();
        self.last_query.clear();
        self.cursor = 0;
        self.offset = 0;
    }

    /// Terminal rows one result occupies: title + meta (+ excerpt) + blank
    /// separator.
    fn rows_per_hit(&self) -> usize {
        if self.show_excerpts {
            4
        } else {
            3
        }
    }

    /// How many results fit in the last rendered viewport.
    fn visible_hits(&self) -> usize {
        (self.last_height.get() / self.rows_per_hit()).max(1)
    }

    /// Pull the scroll window so the cursor stays visible.
    fn scroll_cursor_into_view(&mut self) {
        let visible = self.visible_hits();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + visible {
            self.offset = self.cursor + 1 - visible;
        }
    }

    /// Handle a navigation event from the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.hits.len();
        if total == 0 {
            return;
        }

        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                self.scroll_cursor_into_view();
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < total {
                    self.cursor += 1;
                }
                self.scroll_cursor_into_view();
            }
            AppEvent::ScrollUp => {
                let step = self.visible_hits();
                self.cursor = self.cursor.saturating_sub(step);
                self.scroll_cursor_into_view();
            }
            AppEvent::ScrollDown => {
                let step = self.visible_hits();
                self.cursor = (self.cursor + step).min(total - 1);
                self.scroll_cursor_into_view();
            }
            AppEvent::ScrollToStart => {
                self.cursor = 0;
                self.offset = 0;
            }
            AppEvent::ScrollToEnd => {
                self.cursor = total - 1;
                self.scroll_cursor_into_view();
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultList<'a> {
    state: &'a ResultListState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ResultList<'a> {
    pub fn new(state: &'a ResultListState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title("Results").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        // Cache for handle() — safe because draw always runs before handle()
        self.state.last_height.set(inner.height as usize);

        if self.state.hits.is_empty() {
            let line = if self.state.last_query.trim().is_empty() {
                Line::from(Span::styled(
                    format!(
                        "{} posts indexed — press / to search",
                        self.state.corpus.len()
                    ),
                    Style::default().add_modifier(Modifier::DIM),
                ))
            } else {
                Line::from("No results found")
            };
            Paragraph::new(line).render(inner, buf);
            return;
        }

        let total = self.state.hits.len();
        let visible = self.state.visible_hits();
        let start = self.state.offset.min(total.saturating_sub(1));
        let end = (start + visible).min(total);

        let mut lines: Vec<Line<'static>> = Vec::new();
        for (row, hit) in self.state.hits[start..end].iter().enumerate() {
            let post = &self.state.corpus[hit.index];

            let mut title_line = Line::from(vec![
                Span::styled(unescape_amp(&post.title), self.theme.result_title),
                Span::raw("  "),
                Span::styled(post.url.clone(), Style::default().add_modifier(Modifier::DIM)),
            ]);
            if self.focused && start + row == self.state.cursor {
                title_line =
                    title_line.patch_style(Style::default().add_modifier(Modifier::REVERSED));
            }
            lines.push(title_line);

            lines.push(Line::from(Span::styled(
                format!("{} • {}", post.date, post.tags),
                self.theme.result_meta,
            )));

            if self.state.show_excerpts {
                lines.push(Line::from(Span::styled(
                    unescape_amp(&post.excerpt),
                    self.theme.result_excerpt,
                )));
            }

            lines.push(Line::default());
        }

        // Split inner into text (fill) + 1-column scrollbar strip.
        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Paragraph::new(lines).render(text_area, buf);

        let mut sb_state = ScrollbarState::new(total)
            .position(start)
            .viewport_content_length(visible);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Template helpers
// ---------------------------------------------------------------------------

/// Un-escape the literal `&amp;` entity the site generator leaves in title
/// and excerpt text. Every other character passes through unmodified.
fn unescape_amp(text: &str) -> String {
    text.replace("&amp;", "&")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
