//! Timer payloads scheduled on a [`Clock`][crate::Clock].

use std::fmt;

use lift_core::{Floor, UnitId};

/// What a timer means when it fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// The unit reaches `Floor` and opens its doors.
    Arrival(Floor),
    /// The unit's dwell at its current floor is over.
    DwellEnd,
}

/// A pending completion signal for one unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Timer {
    pub unit: UnitId,
    pub kind: TimerKind,
}

impl Timer {
    pub fn arrival(unit: UnitId, floor: Floor) -> Self {
        Self { unit, kind: TimerKind::Arrival(floor) }
    }

    pub fn dwell_end(unit: UnitId) -> Self {
        Self { unit, kind: TimerKind::DwellEnd }
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TimerKind::Arrival(floor) => write!(f, "{} arrival at {}", self.unit, floor),
            TimerKind::DwellEnd       => write!(f, "{} dwell end", self.unit),
        }
    }
}
