//! Single-slot, auto-dismissing status messages.

use std::time::{Duration, Instant};

use clotho_core::Severity;

/// How long a notification stays visible unless configured otherwise.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(3);

/// A status message shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    #[must_use]
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Danger,
        }
    }
}

#[derive(Debug, Clone)]
struct Shown {
    notification: Notification,
    shown_at: Instant,
}

/// Holds at most one notification. A new one replaces the current one.
#[derive(Debug, Clone)]
pub struct NotificationSlot {
    current: Option<Shown>,
    dismiss_after: Duration,
}

impl Default for NotificationSlot {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}

impl NotificationSlot {
    #[must_use]
    pub const fn new(dismiss_after: Duration) -> Self {
        Self {
            current: None,
            dismiss_after,
        }
    }

    /// Show `notification`, replacing whatever is visible.
    pub fn show(&mut self, notification: Notification, now: Instant) {
        self.current = Some(Shown {
            notification,
            shown_at: now,
        });
    }

    /// The notification visible at `now`, if it has not expired.
    #[must_use]
    pub fn visible_at(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|shown| now.saturating_duration_since(shown.shown_at) < self.dismiss_after)
            .map(|shown| &shown.notification)
    }

    /// Manually dismiss the current notification.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drop the current notification if it has expired at `now`.
    ///
    /// Returns `true` if something was dropped.
    pub fn expire(&mut self, now: Instant) -> bool {
        let expired = self.current.is_some() && self.visible_at(now).is_none();
        if expired {
            self.current = None;
        }
        expired
    }
}
