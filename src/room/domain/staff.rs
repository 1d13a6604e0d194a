//! Staff identity and role types used for attribution.

use super::ParseStaffRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(Uuid);

impl StaffId {
    /// Creates a new random staff identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a staff identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for StaffId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role held by a staff member.
///
/// Full profile management lives outside the core; roles exist only so that
/// audit entries and notifications can attribute actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Cleans rooms and runs cleaning tasks.
    Housekeeping,
    /// Inspects rooms and signs off cleaning work.
    Supervisor,
    /// Handles repair and maintenance tasks.
    Engineering,
    /// Oversees the property; may perform any operation.
    Manager,
}

impl StaffRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Housekeeping => "housekeeping",
            Self::Supervisor => "supervisor",
            Self::Engineering => "engineering",
            Self::Manager => "manager",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for StaffRole {
    type Error = ParseStaffRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "housekeeping" => Ok(Self::Housekeeping),
            "supervisor" => Ok(Self::Supervisor),
            "engineering" => Ok(Self::Engineering),
            "manager" => Ok(Self::Manager),
            _ => Err(ParseStaffRoleError(value.to_owned())),
        }
    }
}

/// Staff member performing an operation, used for attribution only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: StaffId,
    name: String,
    role: StaffRole,
}

impl Actor {
    /// Creates an actor reference.
    #[must_use]
    pub fn new(id: StaffId, name: impl Into<String>, role: StaffRole) -> Self {
        Self {
            id,
            name: name.into(),
            role,
        }
    }

    /// Returns the staff identifier.
    #[must_use]
    pub const fn id(&self) -> StaffId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the staff role.
    #[must_use]
    pub const fn role(&self) -> StaffRole {
        self.role
    }
}
