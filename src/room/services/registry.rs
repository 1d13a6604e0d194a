//! In-memory authoritative view of the room inventory.

use crate::room::domain::{Room, RoomId, RoomNumber, RoomPatch};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Result type for registry operations.
pub type RoomRegistryResult<T> = Result<T, RoomRegistryError>;

/// Errors returned by the room registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoomRegistryError {
    /// No room with the given identifier is loaded.
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// No room with the given number is loaded.
    #[error("room number not found: {0}")]
    RoomNumberNotFound(RoomNumber),

    /// The registry lock was poisoned by a panicking writer.
    #[error("registry lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Shared in-memory snapshot of all rooms, keyed by identity with a unique
/// room-number index.
///
/// The registry is mutated only by the workflow engine and the external-sync
/// callback; dashboard readers observe cloned snapshots. Clones of the
/// registry share the same underlying state.
#[derive(Clone, Default)]
pub struct RoomRegistry {
    state: Arc<RwLock<RegistryState>>,
}

#[derive(Default)]
struct RegistryState {
    rooms: HashMap<RoomId, Room>,
    number_index: HashMap<RoomNumber, RoomId>,
}

impl RegistryState {
    fn insert(&mut self, room: Room) {
        self.number_index.insert(room.room_number().clone(), room.id());
        self.rooms.insert(room.id(), room);
    }
}

impl RoomRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RoomRegistryResult<std::sync::RwLockReadGuard<'_, RegistryState>> {
        self.state
            .read()
            .map_err(|err| RoomRegistryError::LockPoisoned(err.to_string()))
    }

    fn write(&self) -> RoomRegistryResult<std::sync::RwLockWriteGuard<'_, RegistryState>> {
        self.state
            .write()
            .map_err(|err| RoomRegistryError::LockPoisoned(err.to_string()))
    }

    /// Returns the room with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RoomRegistryError::RoomNotFound`] when the room is not
    /// loaded.
    pub fn get(&self, id: RoomId) -> RoomRegistryResult<Room> {
        let state = self.read()?;
        state
            .rooms
            .get(&id)
            .cloned()
            .ok_or(RoomRegistryError::RoomNotFound(id))
    }

    /// Returns the room with the given human-facing number.
    ///
    /// # Errors
    ///
    /// Returns [`RoomRegistryError::RoomNumberNotFound`] when no loaded room
    /// carries the number.
    pub fn find_by_number(&self, room_number: &RoomNumber) -> RoomRegistryResult<Room> {
        let state = self.read()?;
        state
            .number_index
            .get(room_number)
            .and_then(|id| state.rooms.get(id))
            .cloned()
            .ok_or_else(|| RoomRegistryError::RoomNumberNotFound(room_number.clone()))
    }

    /// Replaces the full inventory. Used at session bootstrap and full sync,
    /// never by the workflow engine during normal operation.
    ///
    /// # Errors
    ///
    /// Returns [`RoomRegistryError::LockPoisoned`] when the registry lock is
    /// poisoned.
    pub fn replace_all(&self, rooms: Vec<Room>) -> RoomRegistryResult<()> {
        let mut state = self.write()?;
        state.rooms.clear();
        state.number_index.clear();
        for room in rooms {
            state.insert(room);
        }
        Ok(())
    }

    /// Inserts or replaces a single room. Used by the external-change
    /// subscription callback.
    ///
    /// # Errors
    ///
    /// Returns [`RoomRegistryError::LockPoisoned`] when the registry lock is
    /// poisoned.
    pub fn upsert(&self, room: Room) -> RoomRegistryResult<()> {
        let mut state = self.write()?;
        if let Some(previous) = state.rooms.get(&room.id()) {
            let stale_number = previous.room_number().clone();
            if stale_number != *room.room_number() {
                state.number_index.remove(&stale_number);
            }
        }
        state.insert(room);
        Ok(())
    }

    /// Merges a partial update into an existing room, touching
    /// `last_updated` automatically on any status change.
    ///
    /// Transition legality is not checked here; the workflow engine validates
    /// against the transition table before patching.
    ///
    /// # Errors
    ///
    /// Returns [`RoomRegistryError::RoomNotFound`] when the room is not
    /// loaded.
    pub fn apply_patch(
        &self,
        id: RoomId,
        patch: &RoomPatch,
        clock: &impl Clock,
    ) -> RoomRegistryResult<Room> {
        let mut state = self.write()?;
        let room = state
            .rooms
            .get_mut(&id)
            .ok_or(RoomRegistryError::RoomNotFound(id))?;
        patch.apply(room, clock);
        Ok(room.clone())
    }

    /// Returns a point-in-time snapshot of all loaded rooms.
    ///
    /// # Errors
    ///
    /// Returns [`RoomRegistryError::LockPoisoned`] when the registry lock is
    /// poisoned.
    pub fn snapshot(&self) -> RoomRegistryResult<Vec<Room>> {
        let state = self.read()?;
        Ok(state.rooms.values().cloned().collect())
    }

    /// Returns the number of loaded rooms.
    ///
    /// # Errors
    ///
    /// Returns [`RoomRegistryError::LockPoisoned`] when the registry lock is
    /// poisoned.
    pub fn len(&self) -> RoomRegistryResult<usize> {
        let state = self.read()?;
        Ok(state.rooms.len())
    }

    /// Returns whether no rooms are loaded.
    ///
    /// # Errors
    ///
    /// Returns [`RoomRegistryError::LockPoisoned`] when the registry lock is
    /// poisoned.
    pub fn is_empty(&self) -> RoomRegistryResult<bool> {
        Ok(self.len()? == 0)
    }
}
