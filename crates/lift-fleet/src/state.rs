//! Per-unit movement state.

use std::fmt;

use lift_core::{Floor, Tick};

/// The lifecycle state of one car.
///
/// `Moving` and `Dwelling` always have exactly one outstanding timer on the
/// clock; `Idle` has none and is the only state in which a unit can be
/// selected by the dispatcher.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitState {
    /// No work queued; available for assignment.
    #[default]
    Idle,
    /// Travelling to the floor of the current [`Leg`].
    Moving,
    /// Doors open at the floor just reached; briefly unavailable.
    Dwelling,
}

impl UnitState {
    /// Short lowercase name used in output rows.
    pub fn as_str(self) -> &'static str {
        match self {
            UnitState::Idle     => "idle",
            UnitState::Moving   => "moving",
            UnitState::Dwelling => "dwelling",
        }
    }
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One movement of a unit from `from` to `to`.
///
/// The unit logically stays at `from` until `arrival_tick`, then instantly
/// appears at `to`.  `progress` and `remaining_ticks` give presentation
/// layers the countdown to render in between.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    pub from:           Floor,
    pub to:             Floor,
    pub departure_tick: Tick,
    pub arrival_tick:   Tick,
}

impl Leg {
    /// Total travel time of the leg in ticks.
    #[inline]
    pub fn duration_ticks(&self) -> u64 {
        self.arrival_tick.since(self.departure_tick)
    }

    /// Ticks left until arrival at `now`; 0 once arrived.
    #[inline]
    pub fn remaining_ticks(&self, now: Tick) -> u64 {
        self.arrival_tick.since(now)
    }

    /// Fraction of the leg completed at `now`, in `[0.0, 1.0]`.
    ///
    /// Returns `1.0` for zero-length legs or when `now >= arrival_tick`.
    pub fn progress(&self, now: Tick) -> f32 {
        let total = self.duration_ticks();
        if total == 0 {
            return 1.0;
        }
        let elapsed = now.since(self.departure_tick) as f32;
        (elapsed / total as f32).min(1.0)
    }
}
