//! Port contracts for room inventory.
//!
//! Ports define infrastructure-agnostic interfaces used by room services and
//! the workflow engine.

pub mod repository;

pub use repository::{
    RoomChangeListener, RoomRepository, RoomRepositoryError, RoomRepositoryResult,
    RoomSubscription,
};
