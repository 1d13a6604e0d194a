//! Room registry and synchronization services.

pub mod registry;
pub mod sync;

pub use registry::{RoomRegistry, RoomRegistryError, RoomRegistryResult};
pub use sync::RoomSyncService;
