//! Modal dialog for one [`FormSession`].
//!
//! Each field gets its own input buffer. Nothing reaches the session until
//! submit, where the buffers are written field by field and the session
//! commits. A failure keeps the dialog open with the message under the
//! fields and focus on the offending one.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use tracing::debug;
use tui_input::Input;

use routerdesk_core::{CoreError, FieldSpec};

use crate::action::Action;
use crate::console_bridge::RouterConsole;
use crate::forms::FormSession;
use crate::theme;
use crate::widgets::{centered, hint_line, panel, sub_tabs, text_input};

const LABEL_WIDTH: u16 = 22;

pub struct FormDialog {
    session: Box<dyn FormSession>,
    inputs: Vec<Input>,
    focus: usize,
    error: Option<String>,
}

impl FormDialog {
    pub fn new(session: Box<dyn FormSession>) -> Self {
        let inputs = session
            .fields()
            .iter()
            .map(|spec| Input::new(session.value(spec.name)))
            .collect();
        Self {
            session,
            inputs,
            focus: 0,
            error: None,
        }
    }

    pub fn title(&self) -> String {
        self.session.title()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn fields(&self) -> &'static [FieldSpec] {
        self.session.fields()
    }

    fn focused_spec(&self) -> Option<&'static FieldSpec> {
        self.fields().get(self.focus)
    }

    /// Step a choice field to the next or previous allowed value.
    fn cycle_choice(&mut self, forward: bool) -> bool {
        let Some(spec) = self.focused_spec() else {
            return false;
        };
        if spec.choices.is_empty() {
            return false;
        }
        let Some(input) = self.inputs.get_mut(self.focus) else {
            return false;
        };
        let count = spec.choices.len();
        let next = match spec
            .choices
            .iter()
            .position(|c| c.eq_ignore_ascii_case(input.value().trim()))
        {
            Some(current) => sub_tabs::cycle(current, count, forward),
            None if forward => 0,
            None => count - 1,
        };
        *input = Input::new(spec.choices[next].to_owned());
        true
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        let count = self.inputs.len();
        match key.code {
            KeyCode::Esc => return Some(Action::CancelForm),
            KeyCode::Enter => return Some(Action::SubmitForm),
            KeyCode::Tab | KeyCode::Down => self.focus = sub_tabs::cycle(self.focus, count, true),
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = sub_tabs::cycle(self.focus, count, false);
            }
            KeyCode::Left if self.cycle_choice(false) => {}
            KeyCode::Right if self.cycle_choice(true) => {}
            _ => {
                let edited = self
                    .inputs
                    .get_mut(self.focus)
                    .is_some_and(|input| text_input::apply_key(input, key));
                if edited {
                    self.error = None;
                }
            }
        }
        None
    }

    /// Write every buffer into the session and commit it.
    pub fn submit(&mut self, console: &mut RouterConsole) -> Result<(), CoreError> {
        let result = self.write_fields().and_then(|()| self.session.submit(console));
        if let Err(err) = &result {
            debug!(form = %self.session.title(), error = %err, "dialog submit failed");
            let fields = self.fields();
            if let Some(idx) = err
                .field()
                .and_then(|field| fields.iter().position(|s| s.name == field))
            {
                self.focus = idx;
            }
            self.error = Some(err.to_string());
        }
        result
    }

    fn write_fields(&mut self) -> Result<(), CoreError> {
        for (spec, input) in self.session.fields().iter().zip(&self.inputs) {
            self.session.set_field(spec.name, input.value())?;
        }
        Ok(())
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let fields = self.fields();
        let rows = u16::try_from(fields.len()).unwrap_or(u16::MAX);
        let dialog = centered(area, 72, rows.saturating_add(6));
        frame.render_widget(Clear, dialog);

        let block = panel(format!(" {} ", self.session.title()), true).style(theme::overlay());
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let [fields_area, error_area, hints_area] = Layout::vertical([
            Constraint::Length(rows),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .margin(1)
        .areas(inner);

        for (idx, (spec, input)) in fields.iter().zip(&self.inputs).enumerate() {
            let y = fields_area.y + u16::try_from(idx).unwrap_or(u16::MAX);
            if y >= fields_area.bottom() {
                break;
            }
            let row = Rect::new(fields_area.x, y, fields_area.width, 1);
            let [label_area, value_area] =
                Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Min(1)])
                    .areas(row);

            let focused = idx == self.focus;
            let marker = if spec.required { "*" } else { " " };
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(
                        crate::widgets::marker(focused),
                        theme::sub_tab_active(),
                    ),
                    Span::styled(format!(" {}{marker}", spec.label), theme::label()),
                ])),
                label_area,
            );

            let style = if focused {
                theme::table_selected()
            } else {
                theme::value()
            };
            text_input::render_input(frame, value_area, input, style, focused);
        }

        let footer = match (&self.error, self.focused_spec()) {
            (Some(message), _) => Line::styled(format!(" {message}"), theme::fail()),
            (None, Some(spec)) if !spec.choices.is_empty() => Line::styled(
                format!(" ←/→ {}", spec.choices.join(" | ")),
                theme::key_hint(),
            ),
            _ => Line::styled(" * required", theme::key_hint()),
        };
        frame.render_widget(Paragraph::new(footer), error_area);
        frame.render_widget(
            Paragraph::new(hint_line(&[
                ("Tab", "next"),
                ("Enter", "save"),
                ("Esc", "cancel"),
            ])),
            hints_area,
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;
    use routerdesk_core::ConsoleConfig;
    use tokio::sync::mpsc;

    use super::*;
    use crate::action::{FormRequest, RecordKind};
    use crate::{console_bridge, forms};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(dialog: &mut FormDialog, text: &str) {
        for c in text.chars() {
            dialog.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn console() -> RouterConsole {
        let (tx, _rx) = mpsc::unbounded_channel();
        console_bridge::connect(ConsoleConfig::default(), tx)
    }

    #[test]
    fn enter_and_escape_map_to_actions() {
        let console = console();
        let session = forms::open(FormRequest::Create(RecordKind::Vlan), &console).unwrap();
        let mut dialog = FormDialog::new(session);
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Enter)),
            Some(Action::SubmitForm)
        ));
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Esc)),
            Some(Action::CancelForm)
        ));
    }

    #[test]
    fn failed_submit_focuses_the_offending_field() {
        let mut console = console();
        let session = forms::open(FormRequest::DhcpSettings, &console).unwrap();
        let mut dialog = FormDialog::new(session);

        // enabled, pool_start, pool_end, lease_hours
        for _ in 0..3 {
            dialog.handle_key(key(KeyCode::Tab));
        }
        dialog.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        type_text(&mut dialog, "soon");
        dialog.handle_key(key(KeyCode::Tab));

        assert!(dialog.submit(&mut console).is_err());
        assert_eq!(dialog.focus, 3);
        assert!(dialog.error().is_some());
        assert_eq!(console.dhcp().settings.lease_hours, 24);

        dialog.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert!(dialog.error().is_none());
        type_text(&mut dialog, "8");
        dialog.submit(&mut console).unwrap();
        assert_eq!(console.dhcp().settings.lease_hours, 8);
    }

    #[test]
    fn arrows_cycle_choice_fields() {
        let console = console();
        let session = forms::open(FormRequest::DhcpSettings, &console).unwrap();
        let mut dialog = FormDialog::new(session);
        assert_eq!(dialog.inputs[0].value(), "yes");
        dialog.handle_key(key(KeyCode::Right));
        assert_eq!(dialog.inputs[0].value(), "no");
        dialog.handle_key(key(KeyCode::Right));
        assert_eq!(dialog.inputs[0].value(), "yes");
    }
}
