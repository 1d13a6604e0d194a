//! Shared test helpers for in-memory integration tests.

use mockable::DefaultClock;
use roomkeeper::room::{
    adapters::memory::InMemoryRoomRepository,
    domain::{Actor, Room, RoomNumber, RoomStatus, StaffId, StaffRole},
    services::registry::RoomRegistry,
};
use roomkeeper::workflow::{
    adapters::memory::{InMemoryAuditRepository, InMemoryNotificationCenter},
    services::WorkflowEngine,
};
use roomkeeper::worklog::adapters::memory::InMemoryWorkLogRepository;
use rstest::fixture;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Engine wired to the in-memory adapters.
pub type InMemoryEngine = WorkflowEngine<
    InMemoryRoomRepository,
    InMemoryWorkLogRepository,
    InMemoryAuditRepository,
    InMemoryNotificationCenter,
    DefaultClock,
>;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Infrastructure shared by every staff session in a test.
pub struct SharedInfra {
    pub registry: RoomRegistry,
    pub rooms: Arc<InMemoryRoomRepository>,
    pub work_logs: Arc<InMemoryWorkLogRepository>,
    pub audit: Arc<InMemoryAuditRepository>,
    pub notifications: Arc<InMemoryNotificationCenter>,
}

impl SharedInfra {
    /// Creates an engine for a new staff session over the shared state.
    pub fn session(&self) -> InMemoryEngine {
        WorkflowEngine::new(
            self.registry.clone(),
            Arc::clone(&self.rooms),
            Arc::clone(&self.work_logs),
            Arc::clone(&self.audit),
            Arc::clone(&self.notifications),
            Arc::new(DefaultClock),
        )
    }

    /// Provisions a room into both the registry and the durable store.
    ///
    /// # Errors
    ///
    /// Returns an error if the room number is invalid or either store rejects
    /// the room.
    pub fn provision(
        &self,
        number: &str,
        status: RoomStatus,
    ) -> Result<Room, Box<dyn std::error::Error + Send + Sync>> {
        let room = Room::new(
            RoomNumber::new(number)?,
            "Main",
            1,
            "double",
            status,
            &DefaultClock,
        );
        self.registry.upsert(room.clone())?;
        self.rooms.insert(room.clone())?;
        Ok(room)
    }
}

/// Provides fresh shared infrastructure for each test.
#[fixture]
pub fn infra() -> SharedInfra {
    SharedInfra {
        registry: RoomRegistry::new(),
        rooms: Arc::new(InMemoryRoomRepository::new()),
        work_logs: Arc::new(InMemoryWorkLogRepository::new()),
        audit: Arc::new(InMemoryAuditRepository::new()),
        notifications: Arc::new(InMemoryNotificationCenter::new()),
    }
}

/// Provides a housekeeping actor.
#[fixture]
pub fn housekeeper() -> Actor {
    Actor::new(StaffId::new(), "Ana", StaffRole::Housekeeping)
}

/// Provides an engineering actor.
#[fixture]
pub fn engineer() -> Actor {
    Actor::new(StaffId::new(), "Eve", StaffRole::Engineering)
}
