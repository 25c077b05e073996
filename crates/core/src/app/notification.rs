use std::time::Duration;

/// How long a notification stays up unless replaced or dismissed
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Identifies one shown notification so its expiry timer can tell
/// whether it is still the one on screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub success: bool,
}

/// Single transient status message. A new one replaces the old one
/// immediately; there is no queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationLifecycle {
    current: Option<Notification>,
    next_id: u64,
    ttl: Duration,
}

impl Default for NotificationLifecycle {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl NotificationLifecycle {
    pub fn new(ttl: Duration) -> Self {
        Self {
            current: None,
            next_id: 1,
            ttl,
        }
    }

    /// Show `message`, replacing whatever is shown. Returns the id the
    /// caller must schedule an expiry for, `ttl()` from now.
    pub fn notify(&mut self, message: impl Into<String>, success: bool) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        self.current = Some(Notification {
            id,
            message: message.into(),
            success,
        });
        id
    }

    /// Empty the notification, whichever one is shown
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Expiry timer for `id` fired. Only clears if `id` is still shown;
    /// a newer notification keeps its own full lifetime.
    pub fn expire(&mut self, id: NotificationId) -> bool {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
