//! Port contracts for the workflow engine's collaborators.

pub mod audit;
pub mod notifications;

pub use audit::{AuditRepository, AuditRepositoryError, AuditRepositoryResult};
pub use notifications::{NotificationSink, NullNotificationSink};
