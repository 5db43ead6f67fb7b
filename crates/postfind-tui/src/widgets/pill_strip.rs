//! Topic pill strip — the one-line row of tag shortcuts at the top of the
//! screen.
//!
//! Pills come from the `[pills] topics` config list, or from the most
//! frequent corpus tags when that list is empty. At most one pill is active
//! at a time: activating one deactivates every other, by construction
//! (`active` is an `Option<usize>`).
//!
//! `←`/`→` (or h/l) move the selection cursor while the strip is focused;
//! Enter is handled by the App shell, which sets the query bar to the
//! pill's term, runs the search, and calls [`PillStripState::activate`].

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// A single topic shortcut carrying its search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pill {
    pub term: String,
}

#[derive(Debug, Default)]
pub struct PillStripState {
    pub pills: Vec<Pill>,
    /// Selection cursor while the strip is focused.
    pub cursor: usize,
    /// The exclusively active pill, if any.
    pub active: Option<usize>,
}

impl PillStripState {
    pub fn new(terms: Vec<String>) -> Self {
        Self {
            pills: terms.into_iter().map(|term| Pill { term }).collect(),
            cursor: 0,
            active: None,
        }
    }

    /// Term of the pill under the selection cursor.
    pub fn selected_term(&self) -> Option<&str> {
        self.pills.get(self.cursor).map(|pill| pill.term.as_str())
    }

    /// Exclusively activate the pill at `index`; every other pill becomes
    /// inactive. Re-activating the already-active pill is a no-op with the
    /// same outcome.
    pub fn activate(&mut self, index: usize) {
        if index < self.pills.len() {
            self.active = Some(index);
            tracing::debug!(index, term = %self.pills[index].term, "pill activated");
        }
    }

    /// Deactivate whichever pill is active.
    pub fn deactivate(&mut self) {
        self.active = None;
    }

    /// Handle a navigation event while the strip is focused.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Nav(Direction::Left) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor + 1 < self.pills.len() {
                    self.cursor += 1;
                }
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// Renders the one-line strip of topic pills.
///
/// The active pill is highlighted with the theme's pill style; the cursor
/// pill is underlined while the strip has focus. Keybinding hints are
/// right-aligned in the same row.
pub struct PillStrip<'a> {
    state: &'a PillStripState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> PillStrip<'a> {
    pub fn new(state: &'a PillStripState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for PillStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans: Vec<Span> = Vec::with_capacity(self.state.pills.len() * 2);
        for (i, pill) in self.state.pills.iter().enumerate() {
            let mut style = if self.state.active == Some(i) {
                self.theme.pill_active
            } else {
                self.theme.pill_inactive
            };
            if self.focused && self.state.cursor == i {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            spans.push(Span::styled(format!(" {} ", pill.term), style));
            spans.push(Span::raw(" "));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);

        // Keybinding hints at the right edge
        let hint = " q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn strip() -> PillStripState {
        PillStripState::new(vec!["go".into(), "rust".into(), "web".into()])
    }

    #[test]
    fn at_most_one_pill_active() {
        let mut s = strip();
        assert_eq!(s.active, None);
        s.activate(0);
        assert_eq!(s.active, Some(0));
        // Activating another pill clears the first.
        s.activate(2);
        assert_eq!(s.active, Some(2));
        // Re-activating is idempotent.
        s.activate(2);
        assert_eq!(s.active, Some(2));
    }

    #[test]
    fn activate_out_of_range_is_ignored() {
        let mut s = strip();
        s.activate(0);
        s.activate(99);
        assert_eq!(s.active, Some(0));
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut s = strip();
        s.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(s.cursor, 0);
        for _ in 0..10 {
            s.handle(&AppEvent::Nav(Direction::Right));
        }
        assert_eq!(s.cursor, 2);
    }

    #[test]
    fn selected_term_follows_cursor() {
        let mut s = strip();
        assert_eq!(s.selected_term(), Some("go"));
        s.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(s.selected_term(), Some("rust"));
    }

    #[test]
    fn empty_strip_has_no_selection() {
        let s = PillStripState::new(Vec::new());
        assert_eq!(s.selected_term(), None);
    }
}
