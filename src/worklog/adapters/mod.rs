//! Adapter implementations of work-log ports.

pub mod memory;

pub use memory::InMemoryWorkLogRepository;
