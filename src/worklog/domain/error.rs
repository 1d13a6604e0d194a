//! Error types for work-log domain validation and parsing.

use super::TimerState;
use thiserror::Error;

/// Errors returned by the task timer state machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkLogDomainError {
    /// A task is already outstanding for this session.
    #[error("a task is already active for this session; finish or reset it first")]
    TaskAlreadyActive,

    /// A timer operation was invoked from a state that forbids it.
    #[error("cannot {operation} while timer is {state}")]
    InvalidTimerState {
        /// Operation that was attempted.
        operation: &'static str,
        /// State the timer was in.
        state: TimerState,
    },

    /// No task is outstanding for this session.
    #[error("no active task for this session")]
    NoActiveTask,
}

/// Error returned while parsing task types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task type: {0}")]
pub struct ParseTaskTypeError(pub String);
