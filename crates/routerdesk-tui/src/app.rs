//! Application core: owns the console, the screens and the event loop.
//!
//! Keys become actions, actions are queued on one channel and drained in
//! order. Console mutations only ever happen in `process_action`, so a
//! screen can never observe a half-applied command. A frame is drawn only
//! when the console revision or the view revision moved since the last one.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Wrap};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tui_input::Input;

use routerdesk_config::TuiSection;
use routerdesk_core::{
    Command, CommandPreview, CommandResult, ConsoleConfig, Notification, NotificationLevel,
    RecordFilter,
};

use crate::action::{Action, PendingConfirm};
use crate::component::Component;
use crate::console_bridge::{self, RouterConsole};
use crate::forms;
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::session::{Input as SessionInput, Session};
use crate::theme;
use crate::widgets::form_dialog::FormDialog;
use crate::widgets::{centered, hint_line, panel, preview_pane, text_input};

const SIDEBAR_WIDTH: u16 = 18;

const GLOBAL_HINTS: &[(&str, &str)] = &[
    ("/", "filter"),
    ("p", "preview"),
    ("?", "help"),
    ("q", "quit"),
];

const HELP_LINES: &[(&str, &str)] = &[
    ("1-9, 0, m", "jump to section"),
    ("Tab / S-Tab", "next / previous section"),
    ("Backspace", "previous section visited"),
    ("/", "filter the current table"),
    ("p", "toggle the command preview"),
    ("PgUp / PgDn", "scroll the preview"),
    ("j / k", "move selection"),
    ("[ / ]", "switch sub-tab"),
    ("n / e / d", "new, edit, delete"),
    ("space", "toggle the selected record"),
    ("y / n", "answer a confirmation"),
    ("Ctrl-c / q", "quit"),
];

pub struct App {
    console: RouterConsole,
    settings: TuiSection,
    active_screen: ScreenId,
    previous_screen: Option<ScreenId>,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    filter: Input,
    filter_active: bool,
    form: Option<FormDialog>,
    pending_confirm: Option<PendingConfirm>,
    notification: Option<(Notification, Instant)>,
    preview_visible: bool,
    preview_scroll: u16,
    /// Bumped by anything that changes what is on screen outside the
    /// console: keys, resizes, processed actions, toast expiry.
    view_revision: u64,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(config: ConsoleConfig, settings: TuiSection) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let console = console_bridge::connect(config, action_tx.clone());
        let screens = create_screens().into_iter().collect();

        Self {
            console,
            settings,
            active_screen: ScreenId::default(),
            previous_screen: None,
            screens,
            running: true,
            help_visible: false,
            filter: Input::default(),
            filter_active: false,
            form: None,
            pending_confirm: None,
            notification: None,
            preview_visible: false,
            preview_scroll: 0,
            view_revision: 0,
            action_tx,
            action_rx,
        }
    }

    /// Main event loop.
    pub async fn run(&mut self) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }

        let tick_rate = Duration::from_millis(self.settings.tick_ms.max(1));
        let mut session = Session::start(tick_rate)?;
        info!(hostname = %self.console.config().hostname, "entering main loop");

        let mut drawn = None;
        while self.running {
            let stamp = self.frame_stamp();
            if drawn != Some(stamp) {
                session.draw(|frame| self.render(frame))?;
                drawn = Some(stamp);
            }

            let Some(input) = session.next().await else {
                break;
            };
            match input {
                SessionInput::Key(key) => {
                    // Screens may move their own selection without emitting
                    // an action.
                    self.touch();
                    if let Some(action) = self.handle_key_event(key)? {
                        self.dispatch(action);
                    }
                }
                SessionInput::Resize => self.touch(),
                SessionInput::Tick => self.dispatch(Action::Tick),
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(action)?;
            }
        }

        drop(session);
        info!("main loop finished");
        Ok(())
    }

    /// Identifies what the current frame shows.
    fn frame_stamp(&self) -> (u64, u64) {
        (self.console.revision(), self.view_revision)
    }

    fn touch(&mut self) {
        self.view_revision = self.view_revision.wrapping_add(1);
    }

    fn dispatch(&self, action: Action) {
        // The receiver lives in `self`, so the channel cannot be closed here.
        let _ = self.action_tx.send(action);
    }

    fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.settings.toast_secs)
    }

    fn active(&self) -> Option<&dyn Component> {
        self.screens.get(&self.active_screen).map(Box::as_ref)
    }

    // ── Keys ─────────────────────────────────────────────────────────

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if let Some(dialog) = self.form.as_mut() {
            return Ok(dialog.handle_key(key));
        }

        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.filter_active {
            return Ok(self.handle_filter_key(key));
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?' | 'q') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        let captured = self.active().is_some_and(Component::captures_input);
        if !captured {
            if let Some(action) = self.global_key(key) {
                return Ok(Some(action));
            }
        }

        match self.screens.get_mut(&self.active_screen) {
            Some(screen) => screen.handle_key_event(key, &self.console),
            None => Ok(None),
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.filter_active = false;
                Some(Action::ClearFilter)
            }
            KeyCode::Enter => Some(Action::CloseFilter),
            _ if text_input::apply_key(&mut self.filter, key) => {
                Some(Action::FilterChanged(self.filter.value().to_owned()))
            }
            _ => None,
        }
    }

    fn global_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('?') => Some(Action::ToggleHelp),
            KeyCode::Char('/') => Some(Action::OpenFilter),
            KeyCode::Char('p') => Some(Action::TogglePreview),
            KeyCode::Char(c) => ScreenId::from_key(c).map(Action::SwitchScreen),
            KeyCode::Tab => Some(Action::SwitchScreen(self.active_screen.next())),
            KeyCode::BackTab => Some(Action::SwitchScreen(self.active_screen.prev())),
            KeyCode::Backspace => Some(Action::GoBack),
            KeyCode::PageUp if self.preview_visible => Some(Action::ScrollPreview(-5)),
            KeyCode::PageDown if self.preview_visible => Some(Action::ScrollPreview(5)),
            KeyCode::Esc if !self.filter.value().is_empty() => Some(Action::ClearFilter),
            _ => None,
        }
    }

    // ── Actions ──────────────────────────────────────────────────────

    fn process_action(&mut self, action: Action) -> Result<()> {
        if !matches!(action, Action::Tick) {
            self.touch();
        }
        match action {
            Action::Quit => self.running = false,

            Action::Tick => {
                let ttl = self.toast_duration();
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() >= ttl)
                {
                    self.notification = None;
                    self.touch();
                }
            }

            Action::SwitchScreen(target) => self.switch_screen(target)?,

            Action::GoBack => {
                if let Some(previous) = self.previous_screen {
                    self.switch_screen(previous)?;
                }
            }

            Action::Execute(command) => self.execute(command),

            Action::ExportLogs(filter) => self.export_logs(filter),

            Action::ShowConfirm(pending) => self.pending_confirm = Some(pending),

            Action::ConfirmYes => {
                if let Some(pending) = self.pending_confirm.take() {
                    self.execute(pending.command);
                }
            }

            Action::ConfirmNo => self.pending_confirm = None,

            Action::OpenForm(request) => match forms::open(request, &self.console) {
                Ok(session) => self.form = Some(FormDialog::new(session)),
                Err(err) => {
                    warn!(?request, error = %err, "cannot open dialog");
                    self.show(Notification::error(err.to_string()));
                }
            },

            Action::SubmitForm => {
                if let Some(dialog) = self.form.as_mut() {
                    if dialog.submit(&mut self.console).is_ok() {
                        self.form = None;
                    }
                }
            }

            Action::CancelForm => self.form = None,

            Action::OpenFilter => self.filter_active = true,

            Action::CloseFilter => self.filter_active = false,

            Action::ClearFilter => {
                self.filter.reset();
                self.forward(&Action::ClearFilter)?;
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::TogglePreview => {
                self.preview_visible = !self.preview_visible;
                self.preview_scroll = 0;
            }

            Action::ScrollPreview(delta) => {
                self.preview_scroll = self.preview_scroll.saturating_add_signed(delta);
            }

            Action::Notify(notification) => self.show(notification),

            Action::DismissNotification => self.notification = None,

            other => self.forward(&other)?,
        }
        Ok(())
    }

    /// Hand an action to the active screen and queue its follow-up.
    fn forward(&mut self, action: &Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            if let Some(follow_up) = screen.update(action)? {
                self.dispatch(follow_up);
            }
        }
        Ok(())
    }

    fn switch_screen(&mut self, target: ScreenId) -> Result<()> {
        if target == self.active_screen {
            return Ok(());
        }
        if !self.filter.value().is_empty() {
            self.filter.reset();
            self.forward(&Action::ClearFilter)?;
        }
        self.filter_active = false;

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        debug!(from = %self.active_screen, to = %target, "switching section");
        self.previous_screen = Some(self.active_screen);
        self.active_screen = target;
        self.preview_scroll = 0;
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Failures already reached the user through the console's sink.
    fn execute(&mut self, command: Command) {
        debug!(?command, "executing");
        if let Err(err) = self.console.execute(command) {
            warn!(error = %err, "command failed");
        }
    }

    /// Export through the console, then write pretty JSON to
    /// `tui.export_file`. The queued toast lands after the console's own.
    fn export_logs(&mut self, filter: RecordFilter) {
        let entries = match self.console.execute(Command::ExportLogs(filter)) {
            Ok(CommandResult::Exported(entries)) => entries,
            Ok(_) => return,
            Err(err) => {
                warn!(error = %err, "log export failed");
                return;
            }
        };
        let path = &self.settings.export_file;
        let written = serde_json::to_string_pretty(&entries)
            .map_err(std::io::Error::from)
            .and_then(|json| std::fs::write(path, json + "\n"));
        let toast = match written {
            Ok(()) => {
                info!(count = entries.len(), path = %path.display(), "logs exported");
                Notification::success(format!(
                    "Exported {} log entries to {}",
                    entries.len(),
                    path.display()
                ))
            }
            Err(err) => {
                warn!(error = %err, path = %path.display(), "cannot write log export");
                Notification::error(format!("Cannot write {}: {err}", path.display()))
            }
        };
        let _ = self.action_tx.send(Action::Notify(toast));
    }

    fn show(&mut self, notification: Notification) {
        self.notification = Some((notification, Instant::now()));
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let [body, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());
        let [sidebar, content] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
                .areas(body);

        self.render_sidebar(frame, sidebar);

        let main = if self.preview_visible {
            let [main, side] =
                Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .areas(content);
            let (title, preview) = self.preview();
            preview_pane::render_preview(frame, side, title, &preview, self.preview_scroll);
            main
        } else {
            content
        };

        if let Some(screen) = self.active() {
            screen.render(frame, main, &self.console);
        }

        self.render_status_bar(frame, status);

        if let Some((notification, _)) = &self.notification {
            render_toast(frame, body, notification);
        }
        if let Some(dialog) = &self.form {
            dialog.render(frame, body);
        }
        if let Some(pending) = &self.pending_confirm {
            render_confirm(frame, body, pending);
        }
        if self.help_visible {
            self.render_help(frame, body);
        }
    }

    /// IOS commands equivalent to the active section's state.
    fn preview(&self) -> (&'static str, CommandPreview) {
        let console = &self.console;
        match self.active_screen {
            ScreenId::Interfaces => ("Interface commands", console.interface_preview()),
            ScreenId::Dhcp => ("DHCP commands", console.dhcp_preview()),
            ScreenId::Routing => ("Routing commands", console.routing_preview()),
            ScreenId::Vlans => ("VLAN commands", console.vlan_preview()),
            ScreenId::Vrfs => ("VRF commands", console.vrf_preview()),
            ScreenId::Security => ("Firewall commands", console.firewall_preview()),
            _ => ("Running config", console.running_config()),
        }
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::nav_active()
                } else {
                    theme::nav_inactive()
                };
                Line::from(vec![
                    Span::styled(format!(" {} ", id.key()), theme::key_hint_key()),
                    Span::styled(id.label(), style),
                ])
            })
            .collect();

        let title = format!(" {} ", self.console.config().hostname);
        frame.render_widget(Paragraph::new(lines).block(panel(title, false)), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if self.filter_active {
            let [prompt, input] =
                Layout::horizontal([Constraint::Length(2), Constraint::Min(1)]).areas(area);
            frame.render_widget(Span::styled(" /", theme::key_hint_key()), prompt);
            text_input::render_input(frame, input, &self.filter, theme::value(), true);
            return;
        }

        let mut hints: Vec<(&'static str, &'static str)> = self
            .active()
            .map(|screen| screen.hints().to_vec())
            .unwrap_or_default();
        hints.extend_from_slice(GLOBAL_HINTS);

        let mut line = hint_line(&hints);
        if !self.filter.value().is_empty() {
            line.spans.insert(
                0,
                Span::styled(format!(" filter: {} ", self.filter.value()), theme::warn()),
            );
        }
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let screen_hints = self.active().map(Component::hints).unwrap_or_default();
        let mut lines: Vec<Line> = vec![Line::from(Span::styled(" Global", theme::title_style()))];
        lines.extend(HELP_LINES.iter().map(|(key, desc)| help_row(key, desc)));
        if !screen_hints.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!(" {}", self.active_screen.label()),
                theme::title_style(),
            )));
            lines.extend(screen_hints.iter().map(|(key, desc)| help_row(key, desc)));
        }

        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
        let dialog = centered(area, 56, height);
        frame.render_widget(Clear, dialog);
        frame.render_widget(
            Paragraph::new(lines)
                .style(theme::overlay())
                .block(panel(" Keys ".into(), true)),
            dialog,
        );
    }
}

fn help_row(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {key:<14}"), theme::key_hint_key()),
        Span::styled(desc.to_owned(), theme::key_hint()),
    ])
}

fn level_style(level: NotificationLevel) -> Style {
    match level {
        NotificationLevel::Success => theme::ok(),
        NotificationLevel::Error => theme::fail(),
        NotificationLevel::Warning => theme::warn(),
        NotificationLevel::Info => theme::value(),
    }
}

fn render_toast(frame: &mut Frame, area: Rect, notification: &Notification) {
    let width = u16::try_from(notification.message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .clamp(24, 64)
        .min(area.width);
    let toast = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y,
        width,
        height: 3.min(area.height),
    };

    frame.render_widget(Clear, toast);
    frame.render_widget(
        Paragraph::new(Span::styled(
            notification.message.clone(),
            level_style(notification.level),
        ))
        .style(theme::overlay())
        .block(panel(format!(" {} ", notification.level), true)),
        toast,
    );
}

fn render_confirm(frame: &mut Frame, area: Rect, pending: &PendingConfirm) {
    let dialog = centered(area, 60, 6);
    frame.render_widget(Clear, dialog);

    let lines = vec![
        Line::from(Span::styled(pending.prompt.clone(), theme::value())),
        Line::default(),
        hint_line(&[("y", "confirm"), ("n", "cancel")]),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .style(theme::overlay())
            .block(panel(" Confirm ".into(), true)),
        dialog,
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::screens::test_support::{code, key};

    fn app() -> App {
        App::new(ConsoleConfig::default(), TuiSection::default())
    }

    /// Feed one key and drain the queue the way the main loop does.
    fn press(app: &mut App, event: KeyEvent) {
        if let Some(action) = app.handle_key_event(event).unwrap() {
            app.dispatch(action);
        }
        drain(app);
    }

    fn drain(app: &mut App) {
        while let Ok(action) = app.action_rx.try_recv() {
            app.process_action(action).unwrap();
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, key(c));
        }
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 44)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn number_keys_switch_sections() {
        let mut app = app();
        press(&mut app, key('5'));
        assert_eq!(app.active_screen, ScreenId::Vlans);
        press(&mut app, key('0'));
        assert_eq!(app.active_screen, ScreenId::Logs);
        press(&mut app, code(KeyCode::Backspace));
        assert_eq!(app.active_screen, ScreenId::Vlans);
        press(&mut app, code(KeyCode::Tab));
        assert_eq!(app.active_screen, ScreenId::Vrfs);
        press(&mut app, key('m'));
        assert_eq!(app.active_screen, ScreenId::Monitoring);
        assert!(screen_text(&app).contains("Interface Statistics"));
    }

    #[test]
    fn delete_waits_for_confirmation() {
        let mut app = app();
        press(&mut app, key('5'));
        let before = app.console.vlans().vlans.len();

        press(&mut app, key('d'));
        assert!(
            app.pending_confirm
                .as_ref()
                .is_some_and(|p| p.prompt.starts_with("Delete"))
        );
        press(&mut app, key('n'));
        assert!(app.pending_confirm.is_none());
        assert_eq!(app.console.vlans().vlans.len(), before);

        press(&mut app, key('d'));
        press(&mut app, key('y'));
        assert_eq!(app.console.vlans().vlans.len(), before - 1);
        let (toast, _) = app.notification.as_ref().unwrap();
        assert_eq!(toast.level, NotificationLevel::Success);
    }

    #[test]
    fn create_dialog_adds_a_vlan() {
        let mut app = app();
        press(&mut app, key('5'));
        let before = app.console.vlans().vlans.len();

        press(&mut app, key('n'));
        assert!(app.form.is_some());
        // Digits and 'q' go to the dialog, not the global bindings.
        type_text(&mut app, "77");
        press(&mut app, code(KeyCode::Tab));
        type_text(&mut app, "Lab q");
        press(&mut app, code(KeyCode::Tab));
        press(&mut app, code(KeyCode::Tab));
        type_text(&mut app, "10.77.0.0/24");
        press(&mut app, code(KeyCode::Enter));

        assert!(app.form.is_none());
        assert!(app.running);
        assert_eq!(app.active_screen, ScreenId::Vlans);
        let vlans = &app.console.vlans().vlans;
        assert_eq!(vlans.len(), before + 1);
        assert!(vlans.iter().any(|v| v.vlan_id == 77 && v.name == "Lab q"));
    }

    #[test]
    fn failed_submit_keeps_the_dialog_open() {
        let mut app = app();
        press(&mut app, key('5'));
        let before = app.console.vlans().vlans.len();

        press(&mut app, key('n'));
        press(&mut app, code(KeyCode::Enter));

        let dialog = app.form.as_ref().unwrap();
        assert!(dialog.error().is_some());
        assert_eq!(app.console.vlans().vlans.len(), before);

        press(&mut app, code(KeyCode::Esc));
        assert!(app.form.is_none());
    }

    #[test]
    fn filter_narrows_the_active_table() {
        let mut app = app();
        press(&mut app, key('5'));
        press(&mut app, key('/'));
        assert!(app.filter_active);
        type_text(&mut app, "invit");
        press(&mut app, code(KeyCode::Enter));
        assert!(!app.filter_active);

        let text = screen_text(&app);
        assert!(text.contains("Invitados"));
        assert!(!text.contains("Servidores"));

        press(&mut app, code(KeyCode::Esc));
        assert_eq!(app.filter.value(), "");
        assert!(screen_text(&app).contains("Servidores"));
    }

    #[test]
    fn switching_sections_clears_the_filter() {
        let mut app = app();
        press(&mut app, key('5'));
        press(&mut app, key('/'));
        type_text(&mut app, "iot");
        press(&mut app, code(KeyCode::Enter));
        press(&mut app, key('2'));
        assert_eq!(app.filter.value(), "");
        press(&mut app, key('5'));
        assert!(screen_text(&app).contains("Servidores"));
    }

    #[test]
    fn toasts_expire_on_tick() {
        let mut app = App::new(
            ConsoleConfig::default(),
            TuiSection {
                toast_secs: 0,
                ..TuiSection::default()
            },
        );
        app.dispatch(Action::Notify(Notification::info("hello")));
        drain(&mut app);
        assert!(app.notification.is_some());
        assert!(screen_text(&app).contains("hello"));

        app.dispatch(Action::Tick);
        drain(&mut app);
        assert!(app.notification.is_none());
    }

    #[test]
    fn export_key_writes_the_filtered_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        let mut app = App::new(
            ConsoleConfig::default(),
            TuiSection {
                export_file: path.clone(),
                ..TuiSection::default()
            },
        );
        press(&mut app, key('0'));
        press(&mut app, key('l'));
        press(&mut app, key('l'));
        press(&mut app, key('l'));
        press(&mut app, key('x'));

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e["level"] == "error"));

        let (toast, _) = app.notification.as_ref().unwrap();
        assert!(toast.message.starts_with("Exported 2 log entries"));
    }

    #[test]
    fn idle_ticks_keep_the_frame() {
        let mut app = app();
        let stamp = app.frame_stamp();
        app.dispatch(Action::Tick);
        drain(&mut app);
        assert_eq!(app.frame_stamp(), stamp);
    }

    #[test]
    fn frame_stamp_follows_console_and_view_changes() {
        let mut app = app();
        let stamp = app.frame_stamp();

        press(&mut app, key('5'));
        let switched = app.frame_stamp();
        assert_ne!(switched, stamp);
        assert_eq!(switched.0, stamp.0);

        press(&mut app, key('d'));
        press(&mut app, key('y'));
        assert_eq!(app.frame_stamp().0, stamp.0 + 1);

        // A rejected command changes the toast, not the console.
        let before = app.frame_stamp();
        app.dispatch(Action::Execute(Command::DeleteVlan {
            id: routerdesk_core::RecordId::new(999),
        }));
        drain(&mut app);
        let after = app.frame_stamp();
        assert_eq!(after.0, before.0);
        assert_ne!(after.1, before.1);
    }

    #[test]
    fn captured_input_bypasses_global_keys() {
        let mut app = app();
        press(&mut app, key('9'));
        assert_eq!(app.active_screen, ScreenId::Terminal);
        press(&mut app, key(':'));
        press(&mut app, key('q'));
        press(&mut app, key('1'));
        assert!(app.running);
        assert_eq!(app.active_screen, ScreenId::Terminal);

        press(&mut app, code(KeyCode::Esc));
        press(&mut app, key('q'));
        assert!(!app.running);
    }

    #[test]
    fn preview_follows_the_active_section() {
        let mut app = app();
        press(&mut app, key('4'));
        press(&mut app, key('p'));
        assert!(app.preview_visible);
        assert!(screen_text(&app).contains("ip route 0.0.0.0 0.0.0.0 203.0.113.1"));

        press(&mut app, code(KeyCode::PageDown));
        assert_eq!(app.preview_scroll, 5);
        press(&mut app, key('5'));
        assert_eq!(app.preview_scroll, 0);
        assert_eq!(app.preview().0, "VLAN commands");
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = app();
        press(&mut app, key('?'));
        assert!(app.help_visible);
        press(&mut app, key('5'));
        assert_eq!(app.active_screen, ScreenId::Dashboard);
        assert!(screen_text(&app).contains("jump to section"));
        press(&mut app, code(KeyCode::Esc));
        assert!(!app.help_visible);
    }
}
