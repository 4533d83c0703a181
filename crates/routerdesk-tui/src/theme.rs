//! Console palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

// ── Palette ──────────────────────────────────────────────────────────

pub const ACCENT: Color = Color::Rgb(97, 175, 239); // #61afef
pub const ACCENT_ALT: Color = Color::Rgb(198, 120, 221); // #c678dd
pub const WARM: Color = Color::Rgb(229, 192, 123); // #e5c07b
pub const OK_GREEN: Color = Color::Rgb(152, 195, 121); // #98c379
pub const FAIL_RED: Color = Color::Rgb(224, 108, 117); // #e06c75
pub const ORANGE: Color = Color::Rgb(209, 154, 102); // #d19a66
pub const TEAL: Color = Color::Rgb(86, 182, 194); // #56b6c2

pub const TEXT: Color = Color::Rgb(171, 178, 191); // #abb2bf
pub const MUTED: Color = Color::Rgb(92, 99, 112); // #5c6370
pub const BG_SELECTED: Color = Color::Rgb(44, 49, 58); // #2c313a
pub const BG_OVERLAY: Color = Color::Rgb(33, 37, 43); // #21252b

// ── Semantic styles ──────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ACCENT_ALT)
}

pub fn border_default() -> Style {
    Style::default().fg(MUTED)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(TEXT)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(ACCENT_ALT)
        .bg(BG_SELECTED)
        .add_modifier(Modifier::BOLD)
}

/// Highlighted sidebar entry.
pub fn nav_active() -> Style {
    Style::default()
        .fg(BG_OVERLAY)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn nav_inactive() -> Style {
    Style::default().fg(TEXT)
}

pub fn sub_tab_active() -> Style {
    Style::default()
        .fg(ACCENT_ALT)
        .add_modifier(Modifier::BOLD)
}

pub fn sub_tab_inactive() -> Style {
    Style::default().fg(TEXT)
}

pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Label column in detail panes and forms.
pub fn label() -> Style {
    Style::default().fg(TEXT)
}

pub fn value() -> Style {
    Style::default().fg(ACCENT)
}

/// `# ...` lines in the configuration preview.
pub fn preview_comment() -> Style {
    Style::default().fg(MUTED).add_modifier(Modifier::ITALIC)
}

pub fn preview_command() -> Style {
    Style::default().fg(OK_GREEN)
}

pub fn ok() -> Style {
    Style::default().fg(OK_GREEN)
}

pub fn fail() -> Style {
    Style::default().fg(FAIL_RED)
}

pub fn warn() -> Style {
    Style::default().fg(WARM)
}

/// Background for dialogs drawn over a section.
pub fn overlay() -> Style {
    Style::default().bg(BG_OVERLAY).fg(TEXT)
}
