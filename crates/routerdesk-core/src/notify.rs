// ── Mutation feedback ──
//
// The console reports the outcome of every command to a `NotificationSink`.
// Sinks decide how (or whether) the message is surfaced: the TUI turns
// them into toasts, the CLI shell prints them, tests inspect them.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;
use strum::Display;
use tracing::{error, info, warn};

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// Receives fire-and-forget feedback. Must never fail.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

impl NotificationSink for Box<dyn NotificationSink + Send> {
    fn notify(&mut self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// Keeps the most recent `capacity` notifications in memory.
#[derive(Debug, Clone)]
pub struct MemorySink {
    queue: VecDeque<Notification>,
    capacity: usize,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::with_capacity(50)
    }
}

impl MemorySink {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Notification> + ExactSizeIterator {
        self.queue.iter()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.queue.back()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Take every queued notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }
}

impl NotificationSink for MemorySink {
    fn notify(&mut self, notification: Notification) {
        if self.queue.len() == self.capacity {
            self.queue.pop_front();
        }
        self.queue.push_back(notification);
    }
}

/// Forwards notifications to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, n: Notification) {
        match n.level {
            NotificationLevel::Info | NotificationLevel::Success => {
                info!(level = %n.level, "{}", n.message);
            }
            NotificationLevel::Warning => warn!("{}", n.message),
            NotificationLevel::Error => error!("{}", n.message),
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&mut self, _notification: Notification) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_drops_oldest_past_capacity() {
        let mut sink = MemorySink::with_capacity(2);
        sink.notify(Notification::info("one"));
        sink.notify(Notification::info("two"));
        sink.notify(Notification::error("three"));

        let messages: Vec<_> = sink.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, ["two", "three"]);
        assert_eq!(sink.last().map(|n| n.level), Some(NotificationLevel::Error));
    }

    #[test]
    fn drain_empties_the_queue() {
        let mut sink = MemorySink::default();
        sink.notify(Notification::success("saved"));
        assert_eq!(sink.drain().len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn boxed_sinks_forward() {
        let mut boxed: Box<dyn NotificationSink + Send> = Box::new(NullSink);
        boxed.notify(Notification::warning("ignored"));
    }

    #[test]
    fn display_includes_level() {
        assert_eq!(Notification::success("VLAN 40 created").to_string(), "[success] VLAN 40 created");
    }
}
