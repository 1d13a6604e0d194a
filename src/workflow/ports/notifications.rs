//! Fire-and-forget notification sink.

use crate::workflow::domain::Notification;

/// Observer boundary for user-facing events.
///
/// Emission is fire-and-forget: the core consumes no return value and never
/// blocks on delivery, so the trait stays synchronous. Adapters that deliver
/// over a network should enqueue internally.
pub trait NotificationSink: Send + Sync {
    /// Delivers a notification to the user-facing layer.
    fn emit(&self, notification: Notification);
}

/// Sink that discards all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotificationSink;

impl NotificationSink for NullNotificationSink {
    fn emit(&self, _notification: Notification) {}
}
