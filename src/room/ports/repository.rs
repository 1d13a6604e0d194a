//! Repository port for the durable room store and its change feed.

use crate::room::domain::{Room, RoomId, RoomStatus, StaffId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for room repository operations.
pub type RoomRepositoryResult<T> = Result<T, RoomRepositoryError>;

/// Callback invoked when the durable store reports an external room change.
///
/// The core only depends on this hook; the transport that delivers changes is
/// an adapter concern.
pub trait RoomChangeListener: Send + Sync {
    /// Receives the changed room in its post-change form.
    fn on_room_changed(&self, room: &Room);
}

/// Handle for an active change subscription.
///
/// Dropping the handle does not cancel delivery; call
/// [`RoomRepository::unsubscribe`] with the handle's ID to stop receiving
/// change callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomSubscription(u64);

impl RoomSubscription {
    /// Creates a subscription handle from an adapter-assigned ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the adapter-assigned subscription ID.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Durable room store contract.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Fetches the full room inventory.
    async fn fetch_all(&self) -> RoomRepositoryResult<Vec<Room>>;

    /// Writes a status change, and optionally an assignment change, for one
    /// room.
    ///
    /// `assigned_to` follows the patch convention: `None` leaves the
    /// assignment untouched, `Some(None)` clears it.
    ///
    /// # Errors
    ///
    /// Returns [`RoomRepositoryError::NotFound`] when the room does not exist.
    async fn patch_status(
        &self,
        id: RoomId,
        status: RoomStatus,
        assigned_to: Option<Option<StaffId>>,
    ) -> RoomRepositoryResult<()>;

    /// Registers a listener for externally originated room changes.
    async fn subscribe(
        &self,
        listener: Arc<dyn RoomChangeListener>,
    ) -> RoomRepositoryResult<RoomSubscription>;

    /// Cancels a change subscription. Unknown handles are ignored.
    async fn unsubscribe(&self, subscription: RoomSubscription) -> RoomRepositoryResult<()>;
}

/// Errors returned by room repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RoomRepositoryError {
    /// The room was not found in the durable store.
    #[error("room not found: {0}")]
    NotFound(RoomId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RoomRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
