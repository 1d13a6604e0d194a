//! In-memory append-only audit trail.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::workflow::{
    domain::{AuditFilter, AuditLogEntry},
    ports::{AuditRepository, AuditRepositoryError, AuditRepositoryResult},
};

/// Thread-safe in-memory audit trail.
///
/// Entries are kept in append order; queries return them most recent first.
/// The next append can be made to fail once, which engine tests use to
/// exercise the degraded-commit path.
#[derive(Clone, Default)]
pub struct InMemoryAuditRepository {
    entries: Arc<RwLock<Vec<AuditLogEntry>>>,
    fail_next_append: Arc<AtomicBool>,
}

impl InMemoryAuditRepository {
    /// Creates an empty in-memory audit trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `append` call fail with a persistence error.
    pub fn fail_next_append(&self) {
        self.fail_next_append.store(true, Ordering::SeqCst);
    }

    /// Returns the number of recorded entries.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the store lock is poisoned.
    pub fn len(&self) -> AuditRepositoryResult<usize> {
        Ok(self.read()?.len())
    }

    /// Returns whether no entries have been recorded.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the store lock is poisoned.
    pub fn is_empty(&self) -> AuditRepositoryResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> AuditRepositoryResult<std::sync::RwLockReadGuard<'_, Vec<AuditLogEntry>>> {
        self.entries
            .read()
            .map_err(|err| AuditRepositoryError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append(&self, entry: &AuditLogEntry) -> AuditRepositoryResult<()> {
        if self.fail_next_append.swap(false, Ordering::SeqCst) {
            return Err(AuditRepositoryError::persistence(std::io::Error::other(
                "simulated audit append failure",
            )));
        }
        let mut entries = self.entries.write().map_err(|err| {
            AuditRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        entries.push(entry.clone());
        Ok(())
    }

    async fn query(&self, filter: &AuditFilter) -> AuditRepositoryResult<Vec<AuditLogEntry>> {
        let entries = self.read()?;
        Ok(entries
            .iter()
            .rev()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect())
    }
}
