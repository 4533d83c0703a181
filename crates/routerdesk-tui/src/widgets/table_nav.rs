//! Selection state for one table.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;

const PAGE: usize = 10;

/// Row selection kept in bounds of a table whose length changes under it.
#[derive(Debug, Default)]
pub struct TableNav {
    state: TableState,
}

impl TableNav {
    /// Selected row, clamped to `len`. `None` for an empty table.
    pub fn selected(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.state.selected().unwrap_or(0).min(len - 1))
    }

    pub fn select(&mut self, idx: usize, len: usize) {
        if len == 0 {
            self.state.select(None);
        } else {
            self.state.select(Some(idx.min(len - 1)));
        }
    }

    pub fn reset(&mut self) {
        self.state = TableState::default();
    }

    fn step(&mut self, down: bool, amount: usize, len: usize) {
        let current = self.selected(len).unwrap_or(0);
        let next = if down {
            current.saturating_add(amount)
        } else {
            current.saturating_sub(amount)
        };
        self.select(next, len);
    }

    /// Apply j/k, arrows, g/G and Ctrl+d/u. Returns true if the key moved
    /// the selection.
    pub fn handle_key(&mut self, key: KeyEvent, len: usize) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.step(true, 1, len),
            KeyCode::Char('k') | KeyCode::Up => self.step(false, 1, len),
            KeyCode::Char('d') if ctrl => self.step(true, PAGE, len),
            KeyCode::Char('u') if ctrl => self.step(false, PAGE, len),
            KeyCode::PageDown => self.step(true, PAGE, len),
            KeyCode::PageUp => self.step(false, PAGE, len),
            KeyCode::Char('g') | KeyCode::Home => self.select(0, len),
            KeyCode::Char('G') | KeyCode::End => self.select(len.saturating_sub(1), len),
            _ => return false,
        }
        true
    }

    /// State for `render_stateful_widget`, clamped to `len`.
    pub fn state(&self, len: usize) -> TableState {
        let mut state = self.state;
        state.select(self.selected(len));
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn movement_stays_in_bounds() {
        let mut nav = TableNav::default();
        assert_eq!(nav.selected(3), Some(0));

        nav.handle_key(key(KeyCode::Char('k')), 3);
        assert_eq!(nav.selected(3), Some(0));

        nav.handle_key(key(KeyCode::Char('G')), 3);
        assert_eq!(nav.selected(3), Some(2));

        nav.handle_key(key(KeyCode::Down), 3);
        assert_eq!(nav.selected(3), Some(2));

        assert!(nav.handle_key(key(KeyCode::Char('g')), 3));
        assert_eq!(nav.selected(3), Some(0));
    }

    #[test]
    fn shrinking_table_clamps_selection() {
        let mut nav = TableNav::default();
        nav.select(4, 5);
        assert_eq!(nav.selected(2), Some(1));
        assert_eq!(nav.selected(0), None);
        assert_eq!(nav.state(2).selected(), Some(1));
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut nav = TableNav::default();
        assert!(!nav.handle_key(key(KeyCode::Char('x')), 3));
    }
}
