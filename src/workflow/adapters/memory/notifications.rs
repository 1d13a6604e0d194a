//! Capped in-memory notification center.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::workflow::{domain::Notification, ports::NotificationSink};

/// Number of notifications retained; older ones are evicted.
const RETAINED: usize = 50;

/// Thread-safe notification center retaining the most recent notifications.
///
/// Notifications are ephemeral UI state and never part of the durable audit
/// record. Emission never fails; a poisoned lock drops the event.
#[derive(Clone, Default)]
pub struct InMemoryNotificationCenter {
    entries: Arc<RwLock<VecDeque<Notification>>>,
}

impl InMemoryNotificationCenter {
    /// Creates an empty notification center.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns retained notifications, most recent first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.entries
            .read()
            .map(|entries| entries.iter().rev().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns the number of unread notifications.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.entries
            .read()
            .map(|entries| entries.iter().filter(|n| !n.is_read()).count())
            .unwrap_or_default()
    }

    /// Marks every retained notification as read.
    pub fn mark_all_read(&self) {
        if let Ok(mut entries) = self.entries.write() {
            for notification in entries.iter_mut() {
                notification.mark_read();
            }
        }
    }
}

impl NotificationSink for InMemoryNotificationCenter {
    fn emit(&self, notification: Notification) {
        if let Ok(mut entries) = self.entries.write() {
            entries.push_back(notification);
            while entries.len() > RETAINED {
                entries.pop_front();
            }
        }
    }
}
