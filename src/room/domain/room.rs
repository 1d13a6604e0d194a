//! Room aggregate root and patch types.

use super::{RoomDomainError, RoomId, RoomNumber, RoomStatus, StaffId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Room aggregate root.
///
/// Rooms are provisioned externally and mutated exclusively through workflow
/// transitions; the core never deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    room_number: RoomNumber,
    building: String,
    floor: i16,
    room_type: String,
    status: RoomStatus,
    assigned_to: Option<StaffId>,
    last_updated: DateTime<Utc>,
    is_vip: bool,
    guest_name: Option<String>,
}

/// Parameter object for reconstructing a persisted room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRoomData {
    /// Persisted room identifier.
    pub id: RoomId,
    /// Persisted room number.
    pub room_number: RoomNumber,
    /// Persisted building name.
    pub building: String,
    /// Persisted floor number.
    pub floor: i16,
    /// Persisted room type label.
    pub room_type: String,
    /// Persisted lifecycle status.
    pub status: RoomStatus,
    /// Persisted task assignment, if any.
    pub assigned_to: Option<StaffId>,
    /// Persisted latest mutation timestamp.
    pub last_updated: DateTime<Utc>,
    /// Persisted VIP flag.
    pub is_vip: bool,
    /// Persisted guest name, if occupied.
    pub guest_name: Option<String>,
}

impl Room {
    /// Creates a freshly provisioned room in the given status.
    #[must_use]
    pub fn new(
        room_number: RoomNumber,
        building: impl Into<String>,
        floor: i16,
        room_type: impl Into<String>,
        status: RoomStatus,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: RoomId::new(),
            room_number,
            building: building.into(),
            floor,
            room_type: room_type.into(),
            status,
            assigned_to: None,
            last_updated: clock.utc(),
            is_vip: false,
            guest_name: None,
        }
    }

    /// Reconstructs a room from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRoomData) -> Self {
        Self {
            id: data.id,
            room_number: data.room_number,
            building: data.building,
            floor: data.floor,
            room_type: data.room_type,
            status: data.status,
            assigned_to: data.assigned_to,
            last_updated: data.last_updated,
            is_vip: data.is_vip,
            guest_name: data.guest_name,
        }
    }

    /// Marks the room as VIP.
    #[must_use]
    pub const fn with_vip(mut self) -> Self {
        self.is_vip = true;
        self
    }

    /// Sets the current guest name.
    #[must_use]
    pub fn with_guest_name(mut self, guest_name: impl Into<String>) -> Self {
        self.guest_name = Some(guest_name.into());
        self
    }

    /// Returns the room identifier.
    #[must_use]
    pub const fn id(&self) -> RoomId {
        self.id
    }

    /// Returns the human-facing room number.
    #[must_use]
    pub const fn room_number(&self) -> &RoomNumber {
        &self.room_number
    }

    /// Returns the building name.
    #[must_use]
    pub fn building(&self) -> &str {
        &self.building
    }

    /// Returns the floor number.
    #[must_use]
    pub const fn floor(&self) -> i16 {
        self.floor
    }

    /// Returns the room type label.
    #[must_use]
    pub fn room_type(&self) -> &str {
        &self.room_type
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> RoomStatus {
        self.status
    }

    /// Returns the staff member a live task has assigned, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<StaffId> {
        self.assigned_to
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Returns whether the room is flagged VIP.
    #[must_use]
    pub const fn is_vip(&self) -> bool {
        self.is_vip
    }

    /// Returns the current guest name, if occupied.
    #[must_use]
    pub fn guest_name(&self) -> Option<&str> {
        self.guest_name.as_deref()
    }

    /// Moves the room to a new lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns [`RoomDomainError::IllegalTransition`] when the transition
    /// table does not permit the move; the room is left unchanged.
    pub fn transition_to(
        &mut self,
        target: RoomStatus,
        clock: &impl Clock,
    ) -> Result<(), RoomDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(RoomDomainError::IllegalTransition {
                room_number: self.room_number.clone(),
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Assigns the room to the staff member running a task on it.
    pub fn assign_to(&mut self, staff: StaffId, clock: &impl Clock) {
        self.assigned_to = Some(staff);
        self.touch(clock);
    }

    /// Clears the task assignment.
    pub fn clear_assignment(&mut self, clock: &impl Clock) {
        self.assigned_to = None;
        self.touch(clock);
    }

    /// Updates the `last_updated` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.last_updated = clock.utc();
    }
}

/// Partial update merged into a registry room.
///
/// `assigned_to` uses a double `Option`: the outer level records whether the
/// field is part of the patch, the inner level carries the new value
/// (including clearing the assignment with `Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomPatch {
    status: Option<RoomStatus>,
    assigned_to: Option<Option<StaffId>>,
}

impl RoomPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status field of the patch.
    #[must_use]
    pub const fn with_status(mut self, status: RoomStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the assignment field of the patch.
    #[must_use]
    pub const fn with_assigned_to(mut self, staff: StaffId) -> Self {
        self.assigned_to = Some(Some(staff));
        self
    }

    /// Clears the assignment as part of the patch.
    #[must_use]
    pub const fn with_assignment_cleared(mut self) -> Self {
        self.assigned_to = Some(None);
        self
    }

    /// Returns the status carried by the patch, if any.
    #[must_use]
    pub const fn status(&self) -> Option<RoomStatus> {
        self.status
    }

    /// Returns the assignment change carried by the patch, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<Option<StaffId>> {
        self.assigned_to
    }

    /// Returns whether the patch carries no changes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none() && self.assigned_to.is_none()
    }

    /// Merges the patch into a room, touching `last_updated` when the status
    /// changes.
    pub(crate) fn apply(&self, room: &mut Room, clock: &impl Clock) {
        if let Some(assigned_to) = self.assigned_to {
            room.assigned_to = assigned_to;
        }
        if let Some(status) = self.status {
            if status != room.status {
                room.status = status;
                room.touch(clock);
            }
        }
    }
}
