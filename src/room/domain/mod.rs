//! Domain model for room inventory and lifecycle state.
//!
//! The room domain models the seven-state lifecycle, the fixed transition
//! table, validated identifiers, and staff attribution while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod room;
mod staff;
mod status;

pub use error::{ParseRoomStatusError, ParseStaffRoleError, RoomDomainError};
pub use ids::{RoomId, RoomNumber};
pub use room::{PersistedRoomData, Room, RoomPatch};
pub use staff::{Actor, StaffId, StaffRole};
pub use status::RoomStatus;
