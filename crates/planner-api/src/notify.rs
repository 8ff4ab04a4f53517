//! User-facing notifications
//!
//! Every workflow emits exactly one notification per outcome. The sink is a
//! trait so the CLI can log them and tests can record them.

use std::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);

    fn error(&self, message: &str);
}

/// Notifications as tracing events
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!(target: "notification", "{}", message);
    }

    fn error(&self, message: &str) {
        warn!(target: "notification", "{}", message);
    }
}

/// Keeps every notification in order of emission
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Notification> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Error(m) => Some(m),
                Notification::Success(_) => None,
            })
            .collect()
    }

    fn push(&self, notification: Notification) {
        if let Ok(mut events) = self.events.lock() {
            events.push(notification);
        }
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Notification::Error(message.to_string()));
    }
}
