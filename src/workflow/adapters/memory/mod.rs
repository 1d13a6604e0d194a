//! In-memory workflow adapters.

mod audit;
mod notifications;

pub use audit::InMemoryAuditRepository;
pub use notifications::InMemoryNotificationCenter;
