//! In-process notifiers: a logging sink and a broadcast bus.

use tokio::sync::broadcast;

use crate::ports::{Notification, Notifier};

/// Notifier that only logs, for headless callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        tracing::warn!(
            table = notification.table,
            message = %notification.message,
            "notification"
        );
    }
}

/// Notification bus using a tokio [`broadcast`] channel.
///
/// A presentation layer subscribes and renders whatever arrives. Publishing
/// succeeds even when there are no active subscribers (the notification is
/// simply dropped).
#[derive(Debug, Clone)]
pub struct NotificationBus {
    sender: broadcast::Sender<Notification>,
}

impl NotificationBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to notifications on this bus.
    ///
    /// Returns a receiver that will get all notifications published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Notifier for NotificationBus {
    fn notify(&self, notification: Notification) {
        // send fails only when there are zero receivers.
        let _ = self.sender.send(notification);
    }
}
