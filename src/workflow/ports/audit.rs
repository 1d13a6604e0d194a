//! Repository port for the append-only audit trail.

use crate::workflow::domain::{AuditFilter, AuditLogEntry};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for audit repository operations.
pub type AuditRepositoryResult<T> = Result<T, AuditRepositoryError>;

/// Append-only audit store contract.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Appends one entry. Prior entries are never mutated.
    async fn append(&self, entry: &AuditLogEntry) -> AuditRepositoryResult<()>;

    /// Returns entries matching the filter, most recent first.
    ///
    /// The result is finite and restartable: re-running the query re-reads
    /// the full filtered history rather than resuming a live stream.
    async fn query(&self, filter: &AuditFilter) -> AuditRepositoryResult<Vec<AuditLogEntry>>;
}

/// Errors returned by audit repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AuditRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuditRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
