//! Terminal session for the app loop.
//!
//! Owns raw mode, the alternate screen and the crossterm input stream.
//! There is no render clock: the app redraws after input only when its
//! frame stamp moved, and ticks exist solely to age out toasts.

use std::io::{Stdout, stdout};
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use crossterm::{
    ExecutableCommand, cursor,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::warn;

/// What woke the loop up.
#[derive(Debug)]
pub enum Input {
    Key(KeyEvent),
    /// Size changed. The next draw picks up the new area.
    Resize,
    Tick,
}

/// Raw-mode terminal plus its input. Restores the screen when dropped.
pub struct Session {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    events: EventStream,
    ticks: Interval,
}

impl Session {
    /// Alternate screen, raw mode, hidden cursor.
    pub fn start(tick_rate: Duration) -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        let mut ticks = tokio::time::interval(tick_rate);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // Built before touching the terminal so a failed step below still
        // runs `Drop`.
        let mut session = Self {
            terminal,
            events: EventStream::new(),
            ticks,
        };

        terminal::enable_raw_mode()?;
        stdout()
            .execute(EnterAlternateScreen)?
            .execute(cursor::Hide)?;
        session.terminal.clear()?;
        Ok(session)
    }

    /// Wait for the next key press, resize or tick. `None` once the
    /// terminal stops delivering input.
    pub async fn next(&mut self) -> Option<Input> {
        loop {
            tokio::select! {
                _ = self.ticks.tick() => return Some(Input::Tick),
                event = self.events.next() => match event? {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        return Some(Input::Key(key));
                    }
                    Ok(Event::Resize(..)) => return Some(Input::Resize),
                    Ok(_) => {}
                    Err(err) => {
                        warn!(error = %err, "terminal input failed");
                        return None;
                    }
                },
            }
        }
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        restore();
    }
}

/// Best effort: every step runs even if an earlier one fails.
fn restore() {
    let _ = stdout().execute(cursor::Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// color-eyre hooks whose panic path puts the terminal back first.
/// Install before `Session::start`.
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;

    let panic_hook = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        panic_hook(info);
    }));
    Ok(())
}
