//! Notifier port: user-facing failure messages.
//!
//! Rendering (toasts, banners, status lines) belongs to the presentation
//! layer; facades only hand it the text.

use std::sync::Arc;

/// A single user-facing error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Table the failing operation targeted.
    pub table: &'static str,
    /// Text to display.
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn error(table: &'static str, message: impl Into<String>) -> Self {
        Self {
            table,
            message: message.into(),
        }
    }
}

/// Receives notifications produced by the facades.
pub trait Notifier: Send + Sync {
    /// Surface a notification to the user. Must not fail.
    fn notify(&self, notification: Notification);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}
