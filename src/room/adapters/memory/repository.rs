//! In-memory room repository for tests and local operation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::room::{
    domain::{Room, RoomId, RoomPatch, RoomStatus, StaffId},
    ports::{
        RoomChangeListener, RoomRepository, RoomRepositoryError, RoomRepositoryResult,
        RoomSubscription,
    },
};

/// Thread-safe in-memory room repository.
#[derive(Clone, Default)]
pub struct InMemoryRoomRepository {
    state: Arc<RwLock<InMemoryRoomState>>,
}

#[derive(Default)]
struct InMemoryRoomState {
    rooms: HashMap<RoomId, Room>,
    listeners: HashMap<u64, Arc<dyn RoomChangeListener>>,
    next_subscription: u64,
}

impl InMemoryRoomRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with a room, replacing any record with the same ID.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the store lock is poisoned.
    pub fn insert(&self, room: Room) -> RoomRepositoryResult<()> {
        let mut state = lock_write(&self.state)?;
        state.rooms.insert(room.id(), room);
        Ok(())
    }

    /// Simulates an externally originated change: stores the room and fans it
    /// out to all registered listeners.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the store lock is poisoned.
    pub fn emit_external_change(&self, room: Room) -> RoomRepositoryResult<()> {
        let listeners: Vec<Arc<dyn RoomChangeListener>> = {
            let mut state = lock_write(&self.state)?;
            state.rooms.insert(room.id(), room.clone());
            state.listeners.values().cloned().collect()
        };
        for listener in listeners {
            listener.on_room_changed(&room);
        }
        Ok(())
    }
}

fn lock_write(
    state: &Arc<RwLock<InMemoryRoomState>>,
) -> RoomRepositoryResult<std::sync::RwLockWriteGuard<'_, InMemoryRoomState>> {
    state
        .write()
        .map_err(|err| RoomRepositoryError::persistence(std::io::Error::other(err.to_string())))
}

fn lock_read(
    state: &Arc<RwLock<InMemoryRoomState>>,
) -> RoomRepositoryResult<std::sync::RwLockReadGuard<'_, InMemoryRoomState>> {
    state
        .read()
        .map_err(|err| RoomRepositoryError::persistence(std::io::Error::other(err.to_string())))
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn fetch_all(&self) -> RoomRepositoryResult<Vec<Room>> {
        let state = lock_read(&self.state)?;
        Ok(state.rooms.values().cloned().collect())
    }

    async fn patch_status(
        &self,
        id: RoomId,
        status: RoomStatus,
        assigned_to: Option<Option<StaffId>>,
    ) -> RoomRepositoryResult<()> {
        let mut state = lock_write(&self.state)?;
        let room = state
            .rooms
            .get_mut(&id)
            .ok_or(RoomRepositoryError::NotFound(id))?;

        let mut patch = RoomPatch::new().with_status(status);
        if let Some(assignment) = assigned_to {
            patch = match assignment {
                Some(staff) => patch.with_assigned_to(staff),
                None => patch.with_assignment_cleared(),
            };
        }
        patch.apply(room, &mockable::DefaultClock);
        Ok(())
    }

    async fn subscribe(
        &self,
        listener: Arc<dyn RoomChangeListener>,
    ) -> RoomRepositoryResult<RoomSubscription> {
        let mut state = lock_write(&self.state)?;
        let id = state.next_subscription;
        state.next_subscription += 1;
        state.listeners.insert(id, listener);
        Ok(RoomSubscription::new(id))
    }

    async fn unsubscribe(&self, subscription: RoomSubscription) -> RoomRepositoryResult<()> {
        let mut state = lock_write(&self.state)?;
        state.listeners.remove(&subscription.id());
        Ok(())
    }
}
