//! Single-line text entry on top of `tui-input`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;
use tui_input::{Input, InputRequest};

/// Map an editing key to an input request. Keys the input does not care
/// about (Enter, Esc, Tab, arrows up/down) return `None`.
pub fn input_request(key: KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let request = match key.code {
        KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
        KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
        KeyCode::Char('a') if ctrl => InputRequest::GoToStart,
        KeyCode::Char('e') if ctrl => InputRequest::GoToEnd,
        KeyCode::Char(c) if !ctrl => InputRequest::InsertChar(c),
        KeyCode::Backspace => InputRequest::DeletePrevChar,
        KeyCode::Delete => InputRequest::DeleteNextChar,
        KeyCode::Left => InputRequest::GoToPrevChar,
        KeyCode::Right => InputRequest::GoToNextChar,
        KeyCode::Home => InputRequest::GoToStart,
        KeyCode::End => InputRequest::GoToEnd,
        _ => return None,
    };
    Some(request)
}

/// Feed `key` to `input`. Returns true when the key was an editing key.
pub fn apply_key(input: &mut Input, key: KeyEvent) -> bool {
    match input_request(key) {
        Some(request) => {
            input.handle(request);
            true
        }
        None => false,
    }
}

/// Draw `input` on one line, scrolled so the cursor stays visible.
pub fn render_input(frame: &mut Frame, area: Rect, input: &Input, style: Style, focused: bool) {
    let width = usize::from(area.width.max(1) - 1);
    let scroll = input.visual_scroll(width);
    let offset = u16::try_from(scroll).unwrap_or(u16::MAX);
    frame.render_widget(
        Paragraph::new(input.value().to_owned())
            .style(style)
            .scroll((0, offset)),
        area,
    );
    if focused {
        let cursor = input.visual_cursor().saturating_sub(scroll);
        let x = area.x + u16::try_from(cursor).unwrap_or(area.width);
        frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut Input, code: KeyCode, modifiers: KeyModifiers) -> bool {
        apply_key(input, KeyEvent::new(code, modifiers))
    }

    #[test]
    fn typing_and_editing() {
        let mut input = Input::default();
        for c in "vlan 10".chars() {
            press(&mut input, KeyCode::Char(c), KeyModifiers::NONE);
        }
        assert_eq!(input.value(), "vlan 10");

        press(&mut input, KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(input.value(), "vlan 1");

        press(&mut input, KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert_eq!(input.value(), "vlan ");

        press(&mut input, KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(input.value(), "");
    }

    #[test]
    fn navigation_keys_are_not_consumed() {
        let mut input = Input::default();
        assert!(!press(&mut input, KeyCode::Enter, KeyModifiers::NONE));
        assert!(!press(&mut input, KeyCode::Tab, KeyModifiers::NONE));
        assert!(!press(&mut input, KeyCode::Esc, KeyModifiers::NONE));
    }
}
