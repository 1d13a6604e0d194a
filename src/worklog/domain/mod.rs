//! Domain model for timed tasks.
//!
//! The work-log domain models the task taxonomy, the implied-status mapping
//! tables consulted at task start and finish, and the per-session timer state
//! machine, keeping all infrastructure concerns outside the domain boundary.

mod error;
mod ids;
mod task;
mod timer;

pub use error::{ParseTaskTypeError, WorkLogDomainError};
pub use ids::WorkLogId;
pub use task::{TaskType, WorkLog, WorkLogFilter, WorkLogState};
pub use timer::{ActiveTask, TaskTimer, TimerState};
