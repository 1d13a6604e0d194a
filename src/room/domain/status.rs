//! Room lifecycle status and the fixed transition table.

use super::ParseRoomStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    /// Guest has departed; room needs cleaning.
    Dirty,
    /// Departure inspected; cleaning not yet started.
    CheckoutInspected,
    /// Housekeeping is actively cleaning the room.
    Cleaning,
    /// Cleaned and awaiting inspection or occupancy.
    VacantClean,
    /// Cleaned and inspection passed.
    VacantCleanInspected,
    /// A guest currently occupies the room.
    Occupied,
    /// Room is withdrawn from inventory for repair or maintenance.
    OutOfOrder,
}

impl RoomStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dirty => "dirty",
            Self::CheckoutInspected => "checkout_inspected",
            Self::Cleaning => "cleaning",
            Self::VacantClean => "vacant_clean",
            Self::VacantCleanInspected => "vacant_clean_inspected",
            Self::Occupied => "occupied",
            Self::OutOfOrder => "out_of_order",
        }
    }

    /// Returns the human-facing label shown on dashboards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dirty => "Dirty",
            Self::CheckoutInspected => "Check-out Inspected",
            Self::Cleaning => "Cleaning",
            Self::VacantClean => "Vacant Clean",
            Self::VacantCleanInspected => "Vacant Clean Inspected",
            Self::Occupied => "Occupied",
            Self::OutOfOrder => "Out of Order",
        }
    }

    /// Returns the statuses legally reachable from this one.
    ///
    /// This adjacency table is the single source of truth for room status
    /// transitions; every other component consults it rather than re-deriving
    /// the rules. No status may transition to itself.
    #[must_use]
    pub const fn legal_next_states(self) -> &'static [Self] {
        match self {
            Self::Dirty => &[Self::CheckoutInspected, Self::Cleaning, Self::OutOfOrder],
            Self::CheckoutInspected => &[Self::Cleaning, Self::OutOfOrder],
            Self::Cleaning => &[Self::VacantClean, Self::Dirty],
            Self::VacantClean => &[Self::VacantCleanInspected, Self::Dirty, Self::Occupied],
            Self::VacantCleanInspected => &[Self::Occupied, Self::Dirty],
            Self::Occupied => &[Self::Dirty, Self::OutOfOrder],
            Self::OutOfOrder => &[Self::Dirty],
        }
    }

    /// Returns whether transition to `target` is allowed.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.legal_next_states().contains(&target)
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

impl TryFrom<&str> for RoomStatus {
    type Error = ParseRoomStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "dirty" => Ok(Self::Dirty),
            "checkout_inspected" => Ok(Self::CheckoutInspected),
            "cleaning" => Ok(Self::Cleaning),
            "vacant_clean" => Ok(Self::VacantClean),
            "vacant_clean_inspected" => Ok(Self::VacantCleanInspected),
            "occupied" => Ok(Self::Occupied),
            "out_of_order" => Ok(Self::OutOfOrder),
            _ => Err(ParseRoomStatusError(value.to_owned())),
        }
    }
}
