//! Per-session task timer state machine.

use super::{TaskType, WorkLogDomainError, WorkLogId};
use crate::room::domain::RoomNumber;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of the session timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    /// No task outstanding. Initial and terminal.
    Idle,
    /// A task is accruing elapsed time.
    Running,
    /// A task is outstanding with elapsed time frozen.
    Paused,
}

impl TimerState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Identity of the task a timer is tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTask {
    log_id: WorkLogId,
    room_number: RoomNumber,
    task_type: TaskType,
}

impl ActiveTask {
    /// Returns the work-log identifier assigned at creation.
    #[must_use]
    pub const fn log_id(&self) -> WorkLogId {
        self.log_id
    }

    /// Returns the room the task runs against.
    #[must_use]
    pub const fn room_number(&self) -> &RoomNumber {
        &self.room_number
    }

    /// Returns the kind of work being performed.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }
}

/// Three-state timer tracking at most one task per session.
///
/// `Idle -> Running <-> Paused`, with finish or reset collapsing back to
/// `Idle`. Elapsed time is the accumulated total plus, while running, the
/// wall time since the last re-base point. Each session owns exactly one
/// timer; operations are serialized by the owning session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTimer {
    state: TimerState,
    task: Option<ActiveTask>,
    started_at: Option<DateTime<Utc>>,
    accumulated_secs: i64,
}

impl TaskTimer {
    /// Creates an idle timer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: TimerState::Idle,
            task: None,
            started_at: None,
            accumulated_secs: 0,
        }
    }

    /// Returns the timer state.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// Returns the tracked task, if one is outstanding.
    #[must_use]
    pub const fn task(&self) -> Option<&ActiveTask> {
        self.task.as_ref()
    }

    /// Returns whether no task is outstanding.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, TimerState::Idle)
    }

    /// Returns whether a task is outstanding (running or paused).
    #[must_use]
    pub const fn is_outstanding(&self) -> bool {
        !self.is_idle()
    }

    /// Returns the elapsed seconds reported to callers: the accumulated
    /// total plus, while running, the wall time since the last re-base.
    ///
    /// Monotonically non-decreasing while running; frozen while paused.
    #[must_use]
    pub fn elapsed_secs(&self, clock: &impl Clock) -> i64 {
        let running_delta = self
            .started_at
            .map_or(0, |start| (clock.utc() - start).num_seconds().max(0));
        self.accumulated_secs + running_delta
    }

    /// Begins tracking a new task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogDomainError::TaskAlreadyActive`] unless the timer is
    /// idle.
    pub fn start(
        &mut self,
        log_id: WorkLogId,
        room_number: RoomNumber,
        task_type: TaskType,
        clock: &impl Clock,
    ) -> Result<(), WorkLogDomainError> {
        if !self.is_idle() {
            return Err(WorkLogDomainError::TaskAlreadyActive);
        }
        self.task = Some(ActiveTask {
            log_id,
            room_number,
            task_type,
        });
        self.accumulated_secs = 0;
        self.started_at = Some(clock.utc());
        self.state = TimerState::Running;
        Ok(())
    }

    /// Freezes elapsed time at the value accumulated so far.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogDomainError::InvalidTimerState`] unless the timer is
    /// running.
    pub fn pause(&mut self, clock: &impl Clock) -> Result<(), WorkLogDomainError> {
        if self.state != TimerState::Running {
            return Err(WorkLogDomainError::InvalidTimerState {
                operation: "pause",
                state: self.state,
            });
        }
        self.fold_elapsed(clock);
        self.started_at = None;
        self.state = TimerState::Paused;
        Ok(())
    }

    /// Resumes accrual from the frozen total.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogDomainError::InvalidTimerState`] unless the timer is
    /// paused.
    pub fn resume(&mut self, clock: &impl Clock) -> Result<(), WorkLogDomainError> {
        if self.state != TimerState::Paused {
            return Err(WorkLogDomainError::InvalidTimerState {
                operation: "resume",
                state: self.state,
            });
        }
        self.started_at = Some(clock.utc());
        self.state = TimerState::Running;
        Ok(())
    }

    /// Folds wall time into the accumulated total and re-bases the start
    /// point, bounding drift to one tick interval. No-op unless running.
    pub fn tick(&mut self, clock: &impl Clock) {
        if self.state == TimerState::Running {
            self.fold_elapsed(clock);
            self.started_at = Some(clock.utc());
        }
    }

    /// Forces the timer back to idle, clearing the tracked task and elapsed
    /// total. Always legal and idempotent.
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.task = None;
        self.started_at = None;
        self.accumulated_secs = 0;
    }

    fn fold_elapsed(&mut self, clock: &impl Clock) {
        if let Some(start) = self.started_at {
            self.accumulated_secs += (clock.utc() - start).num_seconds().max(0);
        }
    }
}

impl Default for TaskTimer {
    fn default() -> Self {
        Self::new()
    }
}
