//! Error types for room domain validation and parsing.

use super::{RoomNumber, RoomStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain room values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoomDomainError {
    /// The requested status is not reachable from the current status.
    #[error("illegal transition for room {room_number}: {from} -> {to}")]
    IllegalTransition {
        /// Human-facing room number.
        room_number: RoomNumber,
        /// Status the room currently holds.
        from: RoomStatus,
        /// Status that was requested.
        to: RoomStatus,
    },

    /// The room number is empty or contains whitespace.
    #[error("invalid room number '{0}', expected a non-empty value without whitespace")]
    InvalidRoomNumber(String),
}

/// Error returned while parsing room statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown room status: {0}")]
pub struct ParseRoomStatusError(pub String);

/// Error returned while parsing staff roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown staff role: {0}")]
pub struct ParseStaffRoleError(pub String);
