//! Task taxonomy, implied-status mapping tables, and durable work-log
//! records.

use super::{ParseTaskTypeError, WorkLogId};
use crate::room::domain::{RoomNumber, RoomStatus, StaffId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of timed work performed against a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Housekeeping cleans the room.
    Cleaning,
    /// A supervisor inspects the room.
    Inspection,
    /// Engineering repairs a defect.
    Repair,
    /// Engineering performs scheduled maintenance.
    Maintenance,
}

impl TaskType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cleaning => "cleaning",
            Self::Inspection => "inspection",
            Self::Repair => "repair",
            Self::Maintenance => "maintenance",
        }
    }

    /// Returns the human-facing label shown in notifications.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cleaning => "Cleaning",
            Self::Inspection => "Inspection",
            Self::Repair => "Repair",
            Self::Maintenance => "Maintenance",
        }
    }

    /// Returns the room status implied by starting a task of this type.
    ///
    /// Inspections do not move the room; the engine applies the returned
    /// status best-effort, skipping it when the transition table forbids it.
    #[must_use]
    pub const fn implied_start_status(self) -> Option<RoomStatus> {
        match self {
            Self::Cleaning => Some(RoomStatus::Cleaning),
            Self::Repair | Self::Maintenance => Some(RoomStatus::OutOfOrder),
            Self::Inspection => None,
        }
    }

    /// Returns the room status implied by finishing a task of this type.
    ///
    /// Callers may override this with an explicit next status; either way the
    /// transition is validated against the transition table.
    #[must_use]
    pub const fn implied_finish_status(self) -> RoomStatus {
        match self {
            Self::Cleaning => RoomStatus::VacantClean,
            Self::Inspection => RoomStatus::VacantCleanInspected,
            Self::Repair | Self::Maintenance => RoomStatus::Dirty,
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskType {
    type Error = ParseTaskTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "cleaning" => Ok(Self::Cleaning),
            "inspection" => Ok(Self::Inspection),
            "repair" => Ok(Self::Repair),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(ParseTaskTypeError(value.to_owned())),
        }
    }
}

/// Lifecycle state of a durable work-log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkLogState {
    /// The task is running.
    Active,
    /// The task is paused with elapsed time frozen.
    Paused,
    /// The task is finished; `elapsed_secs` holds the total.
    Finished,
}

/// Durable record of one timed task, surfaced by the work-log collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkLog {
    /// Repository-assigned identifier.
    pub id: WorkLogId,
    /// Room the task ran against.
    pub room_number: RoomNumber,
    /// Staff member who performed the task.
    pub staff_id: StaffId,
    /// Kind of work performed.
    pub task_type: TaskType,
    /// Free-form description, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the task was started.
    pub started_at: DateTime<Utc>,
    /// Seconds accumulated so far, or the final total once finished.
    pub elapsed_secs: i64,
    /// Record lifecycle state.
    pub state: WorkLogState,
}

/// Filter for work-log queries. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkLogFilter {
    room_number: Option<RoomNumber>,
    staff_id: Option<StaffId>,
    task_type: Option<TaskType>,
}

impl WorkLogFilter {
    /// Creates a filter matching all records.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the filter to one room.
    #[must_use]
    pub fn with_room_number(mut self, room_number: RoomNumber) -> Self {
        self.room_number = Some(room_number);
        self
    }

    /// Restricts the filter to one staff member.
    #[must_use]
    pub const fn with_staff_id(mut self, staff_id: StaffId) -> Self {
        self.staff_id = Some(staff_id);
        self
    }

    /// Restricts the filter to one task type.
    #[must_use]
    pub const fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = Some(task_type);
        self
    }

    /// Returns whether the record passes the filter.
    #[must_use]
    pub fn matches(&self, record: &WorkLog) -> bool {
        self.room_number
            .as_ref()
            .is_none_or(|number| record.room_number == *number)
            && self.staff_id.is_none_or(|staff| record.staff_id == staff)
            && self
                .task_type
                .is_none_or(|task_type| record.task_type == task_type)
    }
}
