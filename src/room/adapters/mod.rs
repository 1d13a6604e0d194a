//! Adapter implementations of room ports.

pub mod memory;

pub use memory::InMemoryRoomRepository;
