//! IOS-style command preview shown beside a section.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use routerdesk_core::CommandPreview;

use crate::theme;
use crate::widgets::panel;

/// Styled lines for `preview`, comments dimmed and sub-commands indented.
pub fn preview_lines(preview: &CommandPreview) -> Vec<Line<'static>> {
    if preview.is_empty() {
        return vec![Line::styled("! nothing configured", theme::preview_comment())];
    }
    preview
        .lines()
        .iter()
        .map(|line| {
            let indent = " ".repeat(usize::from(line.indent));
            let style = if line.comment {
                theme::preview_comment()
            } else {
                theme::preview_command()
            };
            Line::from(vec![Span::raw(indent), Span::styled(line.text.clone(), style)])
        })
        .collect()
}

pub fn render_preview(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    preview: &CommandPreview,
    scroll: u16,
) {
    let block = panel(format!(" {title} "), false);
    let paragraph = Paragraph::new(preview_lines(preview))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_preview_gets_a_placeholder() {
        let lines = preview_lines(&CommandPreview::new());
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn sub_commands_are_indented() {
        let mut preview = CommandPreview::new();
        preview.comment("VLANs").line("vlan 10").sub("name Admin");
        let lines = preview_lines(&preview);
        assert_eq!(lines.len(), 3);
        let text: String = lines[2].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with(' '));
        assert!(text.ends_with("name Admin"));
    }
}
