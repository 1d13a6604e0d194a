//! In-memory room adapters.

mod repository;

pub use repository::InMemoryRoomRepository;
