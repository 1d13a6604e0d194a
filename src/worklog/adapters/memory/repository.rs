//! In-memory work-log repository for tests and local operation.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::room::domain::{RoomNumber, StaffId};
use crate::worklog::{
    domain::{TaskType, WorkLog, WorkLogFilter, WorkLogId, WorkLogState},
    ports::{WorkLogRepository, WorkLogRepositoryError, WorkLogRepositoryResult},
};

/// Thread-safe in-memory work-log repository.
///
/// Records are kept in creation order; queries return them most recent
/// first. The next pause can be made to fail once, which engine tests use
/// to exercise the persist-before-transition ordering.
#[derive(Clone, Default)]
pub struct InMemoryWorkLogRepository {
    state: Arc<RwLock<Vec<WorkLog>>>,
    fail_next_pause: Arc<AtomicBool>,
}

impl InMemoryWorkLogRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `pause` call fail with a persistence error.
    pub fn fail_next_pause(&self) {
        self.fail_next_pause.store(true, Ordering::SeqCst);
    }
}

fn lock_write(
    state: &Arc<RwLock<Vec<WorkLog>>>,
) -> WorkLogRepositoryResult<std::sync::RwLockWriteGuard<'_, Vec<WorkLog>>> {
    state
        .write()
        .map_err(|err| WorkLogRepositoryError::persistence(std::io::Error::other(err.to_string())))
}

fn update_record(
    state: &Arc<RwLock<Vec<WorkLog>>>,
    id: WorkLogId,
    apply: impl FnOnce(&mut WorkLog),
) -> WorkLogRepositoryResult<()> {
    let mut records = lock_write(state)?;
    let record = records
        .iter_mut()
        .find(|record| record.id == id)
        .ok_or(WorkLogRepositoryError::NotFound(id))?;
    apply(record);
    Ok(())
}

#[async_trait]
impl WorkLogRepository for InMemoryWorkLogRepository {
    async fn create(
        &self,
        room_number: &RoomNumber,
        staff_id: StaffId,
        task_type: TaskType,
        description: Option<String>,
    ) -> WorkLogRepositoryResult<WorkLogId> {
        let id = WorkLogId::new();
        let record = WorkLog {
            id,
            room_number: room_number.clone(),
            staff_id,
            task_type,
            description,
            started_at: DefaultClock.utc(),
            elapsed_secs: 0,
            state: WorkLogState::Active,
        };
        lock_write(&self.state)?.push(record);
        Ok(id)
    }

    async fn pause(&self, id: WorkLogId, elapsed_secs: i64) -> WorkLogRepositoryResult<()> {
        if self.fail_next_pause.swap(false, Ordering::SeqCst) {
            return Err(WorkLogRepositoryError::persistence(std::io::Error::other(
                "simulated pause failure",
            )));
        }
        update_record(&self.state, id, |record| {
            record.elapsed_secs = elapsed_secs;
            record.state = WorkLogState::Paused;
        })
    }

    async fn resume(&self, id: WorkLogId) -> WorkLogRepositoryResult<()> {
        update_record(&self.state, id, |record| {
            record.state = WorkLogState::Active;
        })
    }

    async fn finish(&self, id: WorkLogId, total_secs: i64) -> WorkLogRepositoryResult<()> {
        update_record(&self.state, id, |record| {
            record.elapsed_secs = total_secs;
            record.state = WorkLogState::Finished;
        })
    }

    async fn query(&self, filter: &WorkLogFilter) -> WorkLogRepositoryResult<Vec<WorkLog>> {
        let records = self.state.read().map_err(|err| {
            WorkLogRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(records
            .iter()
            .rev()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }
}
