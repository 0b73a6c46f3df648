//! Transient notification bookkeeping.
//!
//! The center tracks which toasts are on screen and which timer will
//! retire each one. Rendering is the surface's job.

use serde::{Deserialize, Serialize};

use crate::clock::{Millis, TimerId};
use crate::ids::NotificationId;

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

impl NotificationKind {
    /// Accent colour for the toast background.
    pub fn accent(&self) -> &'static str {
        match self {
            Self::Success => "#95E1A3",
            Self::Error => "#FF8A5B",
            Self::Info => "#4ECDC4",
            Self::Warning => "#FFE66D",
        }
    }
}

/// A notification on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    /// Page time it was shown.
    pub shown_at: Millis,
}

#[derive(Debug, Clone)]
struct ActiveNotification {
    notification: Notification,
    timer: Option<TimerId>,
}

/// Notifications currently on screen.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    next_id: u64,
    active: Vec<ActiveNotification>,
}

impl NotificationCenter {
    /// Create an empty center.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new notification.
    pub fn show(
        &mut self,
        now: Millis,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> Notification {
        let notification = Notification {
            id: NotificationId::new(self.next_id),
            message: message.into(),
            kind,
            shown_at: now,
        };
        self.next_id += 1;
        self.active.push(ActiveNotification {
            notification: notification.clone(),
            timer: None,
        });
        notification
    }

    /// Remember the timer that will auto-dismiss `id`.
    pub fn attach_timer(&mut self, id: NotificationId, timer: TimerId) {
        if let Some(active) = self.active.iter_mut().find(|a| a.notification.id == id) {
            active.timer = Some(timer);
        }
    }

    /// Remove a notification.
    ///
    /// Returns the auto-dismiss timer to cancel, or `None` when `id` is not
    /// on screen (already dismissed or expired).
    pub fn dismiss(&mut self, id: NotificationId) -> Option<Option<TimerId>> {
        let index = self.active.iter().position(|a| a.notification.id == id)?;
        Some(self.active.remove(index).timer)
    }

    /// Check if a notification is on screen.
    pub fn is_active(&self, id: NotificationId) -> bool {
        self.active.iter().any(|a| a.notification.id == id)
    }

    /// Notifications on screen, oldest first.
    pub fn active(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter().map(|a| &a.notification)
    }

    /// Number of notifications on screen.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Check if nothing is on screen.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Forget every notification.
    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TimerQueue;

    #[test]
    fn test_show_assigns_sequential_ids() {
        let mut center = NotificationCenter::new();
        let a = center.show(0, "first", NotificationKind::Info);
        let b = center.show(10, "second", NotificationKind::Error);
        assert_ne!(a.id, b.id);
        assert_eq!(center.len(), 2);
        assert_eq!(b.shown_at, 10);
    }

    #[test]
    fn test_dismiss_returns_timer_once() {
        let mut timers = TimerQueue::new();
        let mut center = NotificationCenter::new();
        let n = center.show(0, "hello", NotificationKind::Success);
        let timer = timers.schedule_once(0, 5000, n.id);
        center.attach_timer(n.id, timer);

        assert_eq!(center.dismiss(n.id), Some(Some(timer)));
        assert_eq!(center.dismiss(n.id), None);
        assert!(center.is_empty());
    }

    #[test]
    fn test_accents() {
        assert_eq!(NotificationKind::Success.accent(), "#95E1A3");
        assert_eq!(NotificationKind::default(), NotificationKind::Info);
    }
}
