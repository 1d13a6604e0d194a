//! Domain model for audit trail entries and user-facing notifications.

mod audit;
mod notification;

pub use audit::{AuditFilter, AuditLogEntry};
pub use notification::{Notification, NotificationSeverity};
