//! Console bridge: routes console notifications into the TUI action loop.
//!
//! The console reports every outcome to its sink synchronously. This sink
//! turns each one into an [`Action::Notify`] so the app loop shows a toast
//! on the next drain, exactly like any other action.

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use routerdesk_core::{Console, ConsoleConfig, Notification, NotificationSink};

use crate::action::Action;

/// The console type every screen reads from.
pub type RouterConsole = Console<ToastSink>;

#[derive(Debug, Clone)]
pub struct ToastSink {
    action_tx: UnboundedSender<Action>,
}

impl ToastSink {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self { action_tx }
    }
}

impl NotificationSink for ToastSink {
    fn notify(&mut self, notification: Notification) {
        debug!(level = %notification.level, "{}", notification.message);
        // A closed channel means the app is shutting down.
        let _ = self.action_tx.send(Action::Notify(notification));
    }
}

/// Seeded console wired to the app's action channel.
pub fn connect(config: ConsoleConfig, action_tx: UnboundedSender<Action>) -> RouterConsole {
    Console::new(config, ToastSink::new(action_tx))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use routerdesk_core::{Command, NotificationLevel, RecordId};
    use tokio::sync::mpsc;

    use super::*;

    #[test]
    fn command_outcomes_arrive_as_notify_actions() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut console = connect(ConsoleConfig::default(), tx);

        console
            .execute(Command::ToggleInterface {
                id: RecordId::new(1),
            })
            .unwrap();
        let _ = console.execute(Command::DeleteVlan {
            id: RecordId::new(99),
        });

        let levels: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|action| match action {
                Action::Notify(n) => n.level,
                other => panic!("unexpected action {other:?}"),
            })
            .collect();
        assert_eq!(
            levels,
            [NotificationLevel::Success, NotificationLevel::Error]
        );
    }
}
