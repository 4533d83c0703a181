//! Component trait implemented by every section screen implements it.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::action::Action;
use crate::console_bridge::RouterConsole;

/// A section screen.
///
/// Screens never mutate the console. They read it while handling keys and
/// rendering, and ask for changes by returning an [`Action`].
pub trait Component: Send {
    /// Handle a keyboard event. Return an Action to dispatch, or None.
    fn handle_key_event(
        &mut self,
        _key: KeyEvent,
        _console: &RouterConsole,
    ) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Process a dispatched action. May return a follow-up action.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Render into the provided frame area.
    fn render(&self, frame: &mut Frame, area: Rect, console: &RouterConsole);

    /// True while the screen is editing text and wants raw keys.
    fn captures_input(&self) -> bool {
        false
    }

    /// Set focus state.
    fn set_focused(&mut self, _focused: bool) {}

    /// Key hints for the status bar.
    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }
}
