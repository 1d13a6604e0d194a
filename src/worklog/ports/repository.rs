//! Repository port for durable work-log records.

use crate::room::domain::{RoomNumber, StaffId};
use crate::worklog::domain::{TaskType, WorkLog, WorkLogFilter, WorkLogId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for work-log repository operations.
pub type WorkLogRepositoryResult<T> = Result<T, WorkLogRepositoryError>;

/// Durable work-log store contract.
#[async_trait]
pub trait WorkLogRepository: Send + Sync {
    /// Creates a work-log record for a newly started task and assigns its
    /// identifier.
    async fn create(
        &self,
        room_number: &RoomNumber,
        staff_id: StaffId,
        task_type: TaskType,
        description: Option<String>,
    ) -> WorkLogRepositoryResult<WorkLogId>;

    /// Records a pause with the elapsed seconds accumulated so far.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogRepositoryError::NotFound`] when the record does not
    /// exist.
    async fn pause(&self, id: WorkLogId, elapsed_secs: i64) -> WorkLogRepositoryResult<()>;

    /// Records a resume.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogRepositoryError::NotFound`] when the record does not
    /// exist.
    async fn resume(&self, id: WorkLogId) -> WorkLogRepositoryResult<()>;

    /// Records completion with the final total duration.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogRepositoryError::NotFound`] when the record does not
    /// exist.
    async fn finish(&self, id: WorkLogId, total_secs: i64) -> WorkLogRepositoryResult<()>;

    /// Returns records matching the filter, most recent first.
    async fn query(&self, filter: &WorkLogFilter) -> WorkLogRepositoryResult<Vec<WorkLog>>;
}

/// Errors returned by work-log repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkLogRepositoryError {
    /// The work-log record was not found.
    #[error("work log not found: {0}")]
    NotFound(WorkLogId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkLogRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
