//! In-memory work-log adapters.

mod repository;

pub use repository::InMemoryWorkLogRepository;
