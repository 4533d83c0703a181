//! Reusable widgets shared by the section screens and overlays.

pub mod form_dialog;
pub mod preview_pane;
pub mod status;
pub mod sub_tabs;
pub mod table_nav;
pub mod text_input;

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders};

use crate::theme;

/// Rounded panel frame with the section title.
pub fn panel(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        })
}

/// `key action  key action` hint line.
pub fn hint_line(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (key, action) in hints {
        spans.push(Span::styled(format!(" {key} "), theme::key_hint_key()));
        spans.push(Span::styled(format!("{action} "), theme::key_hint()));
    }
    Line::from(spans)
}

/// Row marker for the selected table row.
pub fn marker(selected: bool) -> &'static str {
    if selected { "▸" } else { " " }
}

/// A `width` x `height` rect centered in `area`, clipped to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered(area, 60, 10);
        assert_eq!(rect, Rect::new(20, 15, 60, 10));

        let small = centered(Rect::new(0, 0, 30, 8), 60, 20);
        assert!(small.width <= 26 && small.height <= 6);
    }
}
