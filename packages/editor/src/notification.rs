//! # Status Messages
//!
//! Short-lived messages surfaced after an edit or undo. Hosts decide how
//! to draw them; [`NotificationCenter`] is the clock-driven store used by
//! hosts without their own timers.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub duration: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            duration,
        }
    }
}

#[derive(Debug, Clone)]
struct Shown {
    notification: Notification,
    expires_at: Instant,
}

/// Visible notifications plus the full history of what was shown
#[derive(Debug, Default)]
pub struct NotificationCenter {
    visible: Vec<Shown>,
    history: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }

    pub fn push_at(&mut self, notification: Notification, now: Instant) {
        self.prune(now);
        let expires_at = now + notification.duration;
        self.history.push(notification.clone());
        self.visible.push(Shown {
            notification,
            expires_at,
        });
    }

    /// Drop every message whose lifetime has elapsed at `now`
    pub fn prune(&mut self, now: Instant) {
        self.visible.retain(|shown| shown.expires_at > now);
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter().map(|shown| &shown.notification)
    }

    pub fn history(&self) -> &[Notification] {
        &self.history
    }

    pub fn last_message(&self) -> Option<&str> {
        self.history.last().map(|n| n.message.as_str())
    }
}
