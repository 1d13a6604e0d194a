//! Adapter implementations of workflow ports.

pub mod memory;

pub use memory::{InMemoryAuditRepository, InMemoryNotificationCenter};
