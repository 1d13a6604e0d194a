//! Port contracts for work-log persistence.

pub mod repository;

pub use repository::{WorkLogRepository, WorkLogRepositoryError, WorkLogRepositoryResult};
