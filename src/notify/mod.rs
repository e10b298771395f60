//! Notification collaborator.
//!
//! Data views report the outcome of row actions here; the front end decides how to show them.

use std::sync::Mutex;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// Receiver of user-facing success/error messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: Level, message: &str);

    fn success(&self, message: &str) {
        self.notify(Level::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(Level::Error, message);
    }
}

/// Notifier that writes to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: Level, message: &str) {
        match level {
            Level::Success => tracing::info!(target: "notify", "{}", message),
            Level::Error => tracing::warn!(target: "notify", "{}", message),
        }
    }
}

/// Notifier that keeps every message, for front ends that drain and render them later.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Mutex<Vec<(Level, String)>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all pending messages, oldest first.
    pub fn drain(&self) -> Vec<(Level, String)> {
        match self.messages.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for MessageLog {
    fn notify(&self, level: Level, message: &str) {
        let mut guard = match self.messages.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push((level, message.to_string()));
    }
}
