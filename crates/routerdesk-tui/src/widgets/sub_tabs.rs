//! Sub-tab strip for sections that hold more than one table.

use ratatui::text::{Line, Span};

use crate::theme;

/// `[Active]  Other  Other` with the active label highlighted.
pub fn render_sub_tabs<'a>(labels: &[&'a str], active_index: usize) -> Line<'a> {
    let mut spans = Vec::with_capacity(labels.len() * 2 + 1);
    spans.push(Span::raw(" "));

    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme::key_hint()));
        }
        if i == active_index {
            spans.push(Span::styled(format!("[{label}]"), theme::sub_tab_active()));
        } else {
            spans.push(Span::styled(*label, theme::sub_tab_inactive()));
        }
    }
    spans.push(Span::styled("   [ ] switch", theme::key_hint()));

    Line::from(spans)
}

/// Step `current` by one within `count` tabs, wrapping.
pub fn cycle(current: usize, count: usize, forward: bool) -> usize {
    if count == 0 {
        return 0;
    }
    if forward {
        (current + 1) % count
    } else {
        (current + count - 1) % count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_both_ways() {
        assert_eq!(cycle(2, 3, true), 0);
        assert_eq!(cycle(0, 3, false), 2);
        assert_eq!(cycle(0, 0, true), 0);
    }
}
