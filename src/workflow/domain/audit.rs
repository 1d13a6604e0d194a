//! Immutable audit records of committed status transitions.

use crate::room::domain::{Actor, RoomNumber, RoomStatus, StaffId, StaffRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable record of one committed status transition.
///
/// Created exactly once per transition, never mutated or deleted. Ordering
/// across entries is monotonic by creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    room_number: RoomNumber,
    actor_id: StaffId,
    actor_name: String,
    actor_role: StaffRole,
    from_status: RoomStatus,
    to_status: RoomStatus,
    recorded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl AuditLogEntry {
    /// Creates an audit entry attributing a transition to an actor.
    #[must_use]
    pub fn new(
        room_number: RoomNumber,
        actor: &Actor,
        from_status: RoomStatus,
        to_status: RoomStatus,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            room_number,
            actor_id: actor.id(),
            actor_name: actor.name().to_owned(),
            actor_role: actor.role(),
            from_status,
            to_status,
            recorded_at,
            notes: None,
        }
    }

    /// Attaches free-form notes to the entry.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns the room the transition applied to.
    #[must_use]
    pub const fn room_number(&self) -> &RoomNumber {
        &self.room_number
    }

    /// Returns the acting staff identifier.
    #[must_use]
    pub const fn actor_id(&self) -> StaffId {
        self.actor_id
    }

    /// Returns the acting staff display name.
    #[must_use]
    pub fn actor_name(&self) -> &str {
        &self.actor_name
    }

    /// Returns the acting staff role.
    #[must_use]
    pub const fn actor_role(&self) -> StaffRole {
        self.actor_role
    }

    /// Returns the status before the transition.
    #[must_use]
    pub const fn from_status(&self) -> RoomStatus {
        self.from_status
    }

    /// Returns the status after the transition.
    #[must_use]
    pub const fn to_status(&self) -> RoomStatus {
        self.to_status
    }

    /// Returns when the transition was recorded.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Returns the attached notes, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Filter for audit queries. Empty fields match everything; date bounds are
/// inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    room_number: Option<RoomNumber>,
    actor_id: Option<StaffId>,
    from: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
}

impl AuditFilter {
    /// Creates a filter matching all entries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the filter to one room.
    #[must_use]
    pub fn with_room_number(mut self, room_number: RoomNumber) -> Self {
        self.room_number = Some(room_number);
        self
    }

    /// Restricts the filter to one acting staff member.
    #[must_use]
    pub const fn with_actor_id(mut self, actor_id: StaffId) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    /// Restricts the filter to entries recorded at or after the bound.
    #[must_use]
    pub const fn with_from(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    /// Restricts the filter to entries recorded at or before the bound.
    #[must_use]
    pub const fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    /// Returns whether the entry passes the filter.
    #[must_use]
    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        self.room_number
            .as_ref()
            .is_none_or(|number| entry.room_number == *number)
            && self.actor_id.is_none_or(|actor| entry.actor_id == actor)
            && self.from.is_none_or(|from| entry.recorded_at >= from)
            && self.until.is_none_or(|until| entry.recorded_at <= until)
    }
}
