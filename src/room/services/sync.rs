//! Bootstrap and real-time synchronization between the durable room store
//! and the in-memory registry.

use crate::room::{
    ports::{RoomChangeListener, RoomRepository, RoomRepositoryError, RoomSubscription},
    services::registry::{RoomRegistry, RoomRegistryError},
};
use crate::room::domain::Room;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Errors returned by the room sync service.
#[derive(Debug, Error)]
pub enum RoomSyncError {
    /// Registry operation failed.
    #[error(transparent)]
    Registry(#[from] RoomRegistryError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RoomRepositoryError),
}

/// Result type for room sync operations.
pub type RoomSyncResult<T> = Result<T, RoomSyncError>;

/// Keeps the shared registry aligned with the durable room store.
#[derive(Clone)]
pub struct RoomSyncService<R>
where
    R: RoomRepository,
{
    repository: Arc<R>,
    registry: RoomRegistry,
}

struct RegistryUpserter {
    registry: RoomRegistry,
}

impl RoomChangeListener for RegistryUpserter {
    fn on_room_changed(&self, room: &Room) {
        if let Err(err) = self.registry.upsert(room.clone()) {
            // The callback has no caller to surface to; the next bootstrap
            // re-reads the full inventory.
            warn!(room_id = %room.id(), error = %err, "dropping external room change");
        }
    }
}

impl<R> RoomSyncService<R>
where
    R: RoomRepository,
{
    /// Creates a sync service over the given repository and registry.
    #[must_use]
    pub const fn new(repository: Arc<R>, registry: RoomRegistry) -> Self {
        Self {
            repository,
            registry,
        }
    }

    /// Loads the full inventory from the durable store into the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RoomSyncError`] when the fetch or the registry replacement
    /// fails.
    pub async fn bootstrap(&self) -> RoomSyncResult<usize> {
        let rooms = self.repository.fetch_all().await?;
        let count = rooms.len();
        self.registry.replace_all(rooms)?;
        Ok(count)
    }

    /// Subscribes the registry to externally originated room changes.
    ///
    /// Each change is merged into the registry via `upsert`.
    ///
    /// # Errors
    ///
    /// Returns [`RoomSyncError::Repository`] when the subscription cannot be
    /// established.
    pub async fn subscribe(&self) -> RoomSyncResult<RoomSubscription> {
        let listener = Arc::new(RegistryUpserter {
            registry: self.registry.clone(),
        });
        Ok(self.repository.subscribe(listener).await?)
    }

    /// Cancels a previously established change subscription.
    ///
    /// # Errors
    ///
    /// Returns [`RoomSyncError::Repository`] when the repository rejects the
    /// cancellation.
    pub async fn unsubscribe(&self, subscription: RoomSubscription) -> RoomSyncResult<()> {
        Ok(self.repository.unsubscribe(subscription).await?)
    }
}
