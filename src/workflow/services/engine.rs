//! The workflow engine: the central coordinator for status changes, task
//! lifecycle, audit-log emission, and notifications.

use crate::room::{
    domain::{Actor, Room, RoomDomainError, RoomId, RoomNumber, RoomPatch, RoomStatus, StaffId},
    ports::{RoomRepository, RoomRepositoryError},
    services::registry::{RoomRegistry, RoomRegistryError},
};
use crate::workflow::{
    domain::{AuditLogEntry, Notification, NotificationSeverity},
    ports::{AuditRepository, AuditRepositoryError, NotificationSink},
};
use crate::worklog::{
    domain::{TaskTimer, TaskType, TimerState, WorkLogDomainError, WorkLogId},
    ports::{WorkLogRepository, WorkLogRepositoryError},
};
use mockable::Clock;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for workflow operations.
///
/// Validation failures are detected before any mutation and leave all core
/// state unchanged. [`WorkflowError::DegradedCommit`] is the one exception:
/// the local mutation has been committed and is deliberately not rolled back
/// when a durable write behind it fails.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Room domain validation failed (illegal transition).
    #[error(transparent)]
    Room(#[from] RoomDomainError),

    /// Timer state machine rejected the operation.
    #[error(transparent)]
    Timer(#[from] WorkLogDomainError),

    /// Registry lookup or mutation failed.
    #[error(transparent)]
    Registry(#[from] RoomRegistryError),

    /// Durable room store operation failed before any local mutation.
    #[error(transparent)]
    Rooms(#[from] RoomRepositoryError),

    /// Work-log collaborator operation failed.
    #[error(transparent)]
    WorkLogs(#[from] WorkLogRepositoryError),

    /// Audit collaborator operation failed before any local mutation.
    #[error(transparent)]
    Audit(#[from] AuditRepositoryError),

    /// A durable write failed after the local mutation was committed.
    ///
    /// The local change is retained; reconciliation with the durable store is
    /// the caller's concern.
    #[error("room {room_number} was updated locally but the durable write failed: {source}")]
    DegradedCommit {
        /// Room whose local state is ahead of the durable store.
        room_number: RoomNumber,
        /// Failure that interrupted the durable write sequence.
        source: Box<WorkflowError>,
    },

    /// The session timer lock was poisoned by a panicking holder.
    #[error("session timer lock poisoned: {0}")]
    SessionLockPoisoned(String),
}

impl WorkflowError {
    /// Returns whether the error reports a committed-but-unsynced mutation.
    #[must_use]
    pub const fn is_degraded_commit(&self) -> bool {
        matches!(self, Self::DegradedCommit { .. })
    }
}

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Outcome of a successfully finished task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedTask {
    /// Work-log record the task was tracked under.
    pub log_id: WorkLogId,
    /// Total elapsed seconds persisted for the task.
    pub total_secs: i64,
    /// Room in its post-finish form.
    pub room: Room,
}

/// Central coordinator for room status changes and task lifecycle.
///
/// One engine instance serves one staff session and owns that session's
/// timer; the registry and the collaborators behind the ports are shared.
/// Operations on the same engine are expected to be serialized by the owning
/// session (one UI session, one sequential event queue); different sessions
/// acting on different rooms run engines independently.
#[derive(Clone)]
pub struct WorkflowEngine<R, W, A, N, C>
where
    R: RoomRepository,
    W: WorkLogRepository,
    A: AuditRepository,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    registry: RoomRegistry,
    timer: Arc<Mutex<TaskTimer>>,
    rooms: Arc<R>,
    work_logs: Arc<W>,
    audit: Arc<A>,
    notifications: Arc<N>,
    clock: Arc<C>,
}

impl<R, W, A, N, C> WorkflowEngine<R, W, A, N, C>
where
    R: RoomRepository,
    W: WorkLogRepository,
    A: AuditRepository,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    /// Creates an engine for one staff session.
    #[must_use]
    pub fn new(
        registry: RoomRegistry,
        rooms: Arc<R>,
        work_logs: Arc<W>,
        audit: Arc<A>,
        notifications: Arc<N>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            registry,
            timer: Arc::new(Mutex::new(TaskTimer::new())),
            rooms,
            work_logs,
            audit,
            notifications,
            clock,
        }
    }

    /// Returns the shared registry view.
    #[must_use]
    pub const fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    /// Returns the session timer handle, shared with the session ticker.
    #[must_use]
    pub fn timer(&self) -> Arc<Mutex<TaskTimer>> {
        Arc::clone(&self.timer)
    }

    /// Returns the session timer state.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::SessionLockPoisoned`] when the timer lock is
    /// poisoned.
    pub fn timer_state(&self) -> WorkflowResult<TimerState> {
        Ok(self.lock_timer()?.state())
    }

    /// Returns the elapsed seconds of the outstanding task, or zero when
    /// idle.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::SessionLockPoisoned`] when the timer lock is
    /// poisoned.
    pub fn elapsed_secs(&self) -> WorkflowResult<i64> {
        Ok(self.lock_timer()?.elapsed_secs(&*self.clock))
    }

    /// Changes a room's lifecycle status.
    ///
    /// The transition is validated against the transition table before any
    /// mutation; on success the registry is patched first, then the durable
    /// store, then one audit entry is appended and a success notification is
    /// emitted.
    ///
    /// # Errors
    ///
    /// Returns [`RoomDomainError::IllegalTransition`] (wrapped) without any
    /// mutation when the table forbids the move, registry errors when the
    /// room is unknown, and [`WorkflowError::DegradedCommit`] when a durable
    /// write fails after the local commit.
    pub async fn change_status(
        &self,
        room_id: RoomId,
        new_status: RoomStatus,
        actor: &Actor,
        notes: Option<String>,
    ) -> WorkflowResult<Room> {
        let result: WorkflowResult<Room> = async {
            let room = self.registry.get(room_id)?;
            Self::ensure_legal(&room, new_status)?;

            let updated = self
                .commit_transition(&room, new_status, actor, notes, None)
                .await?;
            self.notify(
                NotificationSeverity::Success,
                "Status updated",
                format!(
                    "Room {}: {} -> {}",
                    room.room_number(),
                    room.status(),
                    new_status
                ),
            );
            Ok(updated)
        }
        .await;
        self.report(result, "Status change failed")
    }

    /// Starts a timed task for this session.
    ///
    /// Rejected while a task is outstanding. The work-log collaborator
    /// assigns the task identifier, the timer enters `Running`, and the room
    /// is assigned to the actor. The status implied by the task type is then
    /// applied best-effort: an implied transition the table forbids is
    /// skipped and the task starts anyway.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogDomainError::TaskAlreadyActive`] (wrapped) while a
    /// task is outstanding, registry errors when the room is unknown, and
    /// collaborator or degraded-commit errors from the write sequence.
    pub async fn start_task(
        &self,
        room_id: RoomId,
        task_type: TaskType,
        actor: &Actor,
    ) -> WorkflowResult<WorkLogId> {
        let result: WorkflowResult<WorkLogId> = async {
            let room = self.registry.get(room_id)?;
            if self.lock_timer()?.is_outstanding() {
                return Err(WorkLogDomainError::TaskAlreadyActive.into());
            }

            let log_id = self
                .work_logs
                .create(room.room_number(), actor.id(), task_type, None)
                .await?;
            self.lock_timer()?
                .start(log_id, room.room_number().clone(), task_type, &*self.clock)?;

            match task_type.implied_start_status() {
                Some(implied) if implied != room.status() => {
                    if room.status().can_transition_to(implied) {
                        self.commit_transition(&room, implied, actor, None, Some(Some(actor.id())))
                            .await?;
                    } else {
                        // Deliberate leniency: the task starts even when its
                        // implied status is unreachable from the current one.
                        debug!(
                            room = %room.room_number(),
                            from = %room.status(),
                            to = %implied,
                            "skipping illegal implied status change"
                        );
                        self.commit_assignment(&room, Some(actor.id())).await?;
                    }
                }
                _ => {
                    self.commit_assignment(&room, Some(actor.id())).await?;
                }
            }

            self.notify(
                NotificationSeverity::Success,
                "Task started",
                format!(
                    "{} started on room {} by {}",
                    task_type.label(),
                    room.room_number(),
                    actor.name()
                ),
            );
            Ok(log_id)
        }
        .await;
        self.report(result, "Could not start task")
    }

    /// Pauses the session's running task, freezing its elapsed time.
    ///
    /// The elapsed value is read without touching the timer, persisted to the
    /// work-log collaborator, and only then does the timer transition to
    /// paused, so a failed persist leaves the timer running.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogDomainError::InvalidTimerState`] (wrapped) unless the
    /// timer is running, and work-log collaborator errors from persisting the
    /// frozen elapsed value.
    pub async fn pause_task(&self, actor: &Actor) -> WorkflowResult<i64> {
        let result: WorkflowResult<i64> = async {
            let (log_id, room_number, elapsed) = {
                let timer = self.lock_timer()?;
                if timer.state() != TimerState::Running {
                    return Err(WorkLogDomainError::InvalidTimerState {
                        operation: "pause",
                        state: timer.state(),
                    }
                    .into());
                }
                let task = timer.task().ok_or(WorkLogDomainError::NoActiveTask)?;
                (
                    task.log_id(),
                    task.room_number().clone(),
                    timer.elapsed_secs(&*self.clock),
                )
            };
            self.work_logs.pause(log_id, elapsed).await?;
            self.lock_timer()?.pause(&*self.clock)?;
            self.notify(
                NotificationSeverity::Info,
                "Task paused",
                format!(
                    "Work on room {room_number} paused by {} at {elapsed}s",
                    actor.name()
                ),
            );
            Ok(elapsed)
        }
        .await;
        self.report(result, "Could not pause task")
    }

    /// Resumes the session's paused task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogDomainError::InvalidTimerState`] (wrapped) unless the
    /// timer is paused, and work-log collaborator errors.
    pub async fn resume_task(&self, actor: &Actor) -> WorkflowResult<()> {
        let result: WorkflowResult<()> = async {
            let (log_id, room_number) = {
                let timer = self.lock_timer()?;
                if timer.state() != TimerState::Paused {
                    return Err(WorkLogDomainError::InvalidTimerState {
                        operation: "resume",
                        state: timer.state(),
                    }
                    .into());
                }
                let task = timer.task().ok_or(WorkLogDomainError::NoActiveTask)?;
                (task.log_id(), task.room_number().clone())
            };
            self.work_logs.resume(log_id).await?;
            self.lock_timer()?.resume(&*self.clock)?;
            self.notify(
                NotificationSeverity::Info,
                "Task resumed",
                format!("Work on room {room_number} resumed by {}", actor.name()),
            );
            Ok(())
        }
        .await;
        self.report(result, "Could not resume task")
    }

    /// Finishes the session's outstanding task on the given room.
    ///
    /// The next status is the explicit one when supplied, otherwise the one
    /// implied by the task type. Unlike task start, an illegal resolved
    /// transition fails the whole finish and leaves the task outstanding so
    /// the caller can retry with a valid explicit status. On success the
    /// total duration is persisted, the room assignment is cleared, the timer
    /// returns to idle, and the notification carries the total elapsed time.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogDomainError::NoActiveTask`] (wrapped) when no task is
    /// outstanding for this room, [`RoomDomainError::IllegalTransition`]
    /// (wrapped) for an illegal resolved status, collaborator errors, and
    /// [`WorkflowError::DegradedCommit`] when a durable write fails after the
    /// local commit (the timer still resets in that case).
    pub async fn finish_task(
        &self,
        room_id: RoomId,
        actor: &Actor,
        explicit_next_status: Option<RoomStatus>,
    ) -> WorkflowResult<FinishedTask> {
        let result: WorkflowResult<FinishedTask> = async {
            let room = self.registry.get(room_id)?;
            let (log_id, task_type, total_secs) = {
                let timer = self.lock_timer()?;
                let task = timer
                    .task()
                    .filter(|task| task.room_number() == room.room_number())
                    .ok_or(WorkLogDomainError::NoActiveTask)?;
                (
                    task.log_id(),
                    task.task_type(),
                    timer.elapsed_secs(&*self.clock),
                )
            };

            let next_status =
                explicit_next_status.unwrap_or_else(|| task_type.implied_finish_status());
            if next_status != room.status() {
                Self::ensure_legal(&room, next_status)?;
            }

            self.work_logs.finish(log_id, total_secs).await?;

            let commit = if next_status == room.status() {
                self.commit_assignment(&room, None).await
            } else {
                self.commit_transition(&room, next_status, actor, None, Some(None))
                    .await
            };
            let updated = match commit {
                Ok(updated) => updated,
                // The transition is committed locally; the task must not stay
                // outstanding just because the durable write lagged.
                Err(err @ WorkflowError::DegradedCommit { .. }) => {
                    self.lock_timer()?.reset();
                    return Err(err);
                }
                Err(err) => return Err(err),
            };

            self.lock_timer()?.reset();
            self.notify(
                NotificationSeverity::Success,
                "Task finished",
                format!(
                    "{} finished on room {} by {} in {total_secs}s",
                    task_type.label(),
                    room.room_number(),
                    actor.name()
                ),
            );
            Ok(FinishedTask {
                log_id,
                total_secs,
                room: updated,
            })
        }
        .await;
        self.report(result, "Could not finish task")
    }

    fn ensure_legal(room: &Room, target: RoomStatus) -> WorkflowResult<()> {
        if room.status().can_transition_to(target) {
            return Ok(());
        }
        Err(RoomDomainError::IllegalTransition {
            room_number: room.room_number().clone(),
            from: room.status(),
            to: target,
        }
        .into())
    }

    /// Commits a validated transition: registry first, then the durable
    /// store, then the audit entry. Failures after the registry commit
    /// surface as [`WorkflowError::DegradedCommit`].
    async fn commit_transition(
        &self,
        room: &Room,
        new_status: RoomStatus,
        actor: &Actor,
        notes: Option<String>,
        assignment: Option<Option<StaffId>>,
    ) -> WorkflowResult<Room> {
        let mut patch = RoomPatch::new().with_status(new_status);
        if let Some(change) = assignment {
            patch = match change {
                Some(staff) => patch.with_assigned_to(staff),
                None => patch.with_assignment_cleared(),
            };
        }
        let updated = self.registry.apply_patch(room.id(), &patch, &*self.clock)?;

        if let Err(err) = self
            .rooms
            .patch_status(room.id(), new_status, assignment)
            .await
        {
            return Err(self.degraded(room.room_number().clone(), err.into()));
        }

        let mut entry = AuditLogEntry::new(
            room.room_number().clone(),
            actor,
            room.status(),
            new_status,
            self.clock.utc(),
        );
        if let Some(text) = notes {
            entry = entry.with_notes(text);
        }
        if let Err(err) = self.audit.append(&entry).await {
            return Err(self.degraded(room.room_number().clone(), err.into()));
        }

        info!(
            room = %room.room_number(),
            from = %room.status(),
            to = %new_status,
            actor = %actor.name(),
            "room status changed"
        );
        Ok(updated)
    }

    /// Commits an assignment-only change to the registry and the durable
    /// store, with no status movement and no audit entry.
    async fn commit_assignment(
        &self,
        room: &Room,
        assignment: Option<StaffId>,
    ) -> WorkflowResult<Room> {
        let patch = match assignment {
            Some(staff) => RoomPatch::new().with_assigned_to(staff),
            None => RoomPatch::new().with_assignment_cleared(),
        };
        let updated = self.registry.apply_patch(room.id(), &patch, &*self.clock)?;

        if let Err(err) = self
            .rooms
            .patch_status(room.id(), updated.status(), Some(assignment))
            .await
        {
            return Err(self.degraded(room.room_number().clone(), err.into()));
        }
        Ok(updated)
    }

    fn degraded(&self, room_number: RoomNumber, source: WorkflowError) -> WorkflowError {
        warn!(room = %room_number, error = %source, "durable write failed after local commit");
        self.notify(
            NotificationSeverity::Warning,
            "Sync pending",
            format!("Room {room_number} was updated locally but the change could not be written to the store"),
        );
        WorkflowError::DegradedCommit {
            room_number,
            source: Box::new(source),
        }
    }

    /// Maps any failure to an error notification before surfacing it; the
    /// degraded-commit path has already emitted its warning.
    fn report<T>(&self, result: WorkflowResult<T>, title: &'static str) -> WorkflowResult<T> {
        if let Err(err) = &result {
            if !err.is_degraded_commit() {
                self.notify(NotificationSeverity::Error, title, err.to_string());
            }
        }
        result
    }

    fn notify(&self, severity: NotificationSeverity, title: &str, message: String) {
        self.notifications
            .emit(Notification::new(title, message, severity, self.clock.utc()));
    }

    fn lock_timer(&self) -> WorkflowResult<MutexGuard<'_, TaskTimer>> {
        self.timer
            .lock()
            .map_err(|err| WorkflowError::SessionLockPoisoned(err.to_string()))
    }
}
