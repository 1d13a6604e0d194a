//! Ephemeral user-facing notification events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationSeverity {
    /// Neutral information.
    Info,
    /// An operation completed.
    Success,
    /// Degraded but committed outcome.
    Warning,
    /// An operation failed.
    Error,
}

impl NotificationSeverity {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for NotificationSeverity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Ephemeral UI event. Not part of the durable audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    title: String,
    message: String,
    severity: NotificationSeverity,
    created_at: DateTime<Utc>,
    read: bool,
}

impl Notification {
    /// Creates an unread notification.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        severity: NotificationSeverity,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
            created_at,
            read: false,
        }
    }

    /// Returns the notification title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the notification message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the severity category.
    #[must_use]
    pub const fn severity(&self) -> NotificationSeverity {
        self.severity
    }

    /// Returns when the notification was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the notification has been read.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read
    }

    /// Marks the notification as read.
    pub fn mark_read(&mut self) {
        self.read = true;
    }
}
