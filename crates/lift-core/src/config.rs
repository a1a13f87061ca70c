//! Fleet and run configuration.
//!
//! Typically loaded from a JSON file by the application crate (with the
//! `serde` feature) and passed to the simulation builder.  Missing fields fall
//! back to the defaults below.

use crate::{Floor, LiftError, LiftResult, Tick, TimeScale};

// ── FleetConfig ───────────────────────────────────────────────────────────────

/// Shape and timing of the elevator fleet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetConfig {
    /// Number of cars.  Must be at least 1.  Default: 5.
    pub num_units: usize,

    /// Number of floors, served as `0..num_floors`.  Must be at least 1.
    /// Default: 10.
    pub num_floors: u32,

    /// Ticks needed to travel one floor.  Default: 3.
    pub per_floor_ticks: u64,

    /// Ticks a car holds its doors open after arriving.  Default: 2.
    pub dwell_ticks: u64,

    /// Wall-clock length of one tick.  Must be non-zero.  Default: 1000 ms.
    pub tick_duration_ms: u32,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            num_units:        5,
            num_floors:       10,
            per_floor_ticks:  3,
            dwell_ticks:      2,
            tick_duration_ms: 1_000,
        }
    }
}

impl FleetConfig {
    /// A default-timed fleet of `num_units` cars over `num_floors` floors.
    pub fn new(num_units: usize, num_floors: u32) -> Self {
        Self { num_units, num_floors, ..Self::default() }
    }

    /// Reject fleet shapes the engine cannot run.
    pub fn validate(&self) -> LiftResult<()> {
        if self.num_units == 0 {
            return Err(LiftError::InvalidConfiguration(
                "num_units must be at least 1".into(),
            ));
        }
        if self.num_units >= u32::MAX as usize {
            return Err(LiftError::InvalidConfiguration(format!(
                "num_units {} exceeds the unit id range",
                self.num_units
            )));
        }
        if self.num_floors == 0 {
            return Err(LiftError::InvalidConfiguration(
                "num_floors must be at least 1".into(),
            ));
        }
        if self.tick_duration_ms == 0 {
            return Err(LiftError::InvalidConfiguration(
                "tick_duration_ms must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Validate a raw floor request against `[0, num_floors)`.
    pub fn check_floor(&self, raw: i64) -> LiftResult<Floor> {
        check_floor(raw, self.num_floors)
    }

    /// Ticks needed to travel from `from` to `to`.  Zero when they are equal;
    /// saturates at `u64::MAX`.
    #[inline]
    pub fn travel_ticks(&self, from: Floor, to: Floor) -> u64 {
        (from.distance(to) as u64).saturating_mul(self.per_floor_ticks)
    }

    pub fn time_scale(&self) -> TimeScale {
        TimeScale::new(self.tick_duration_ms)
    }
}

/// Validate `raw` against `[0, num_floors)`.
pub fn check_floor(raw: i64, num_floors: u32) -> LiftResult<Floor> {
    if raw < 0 || raw >= num_floors as i64 {
        return Err(LiftError::InvalidFloor { floor: raw, num_floors });
    }
    Ok(Floor(raw as u32))
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    pub fleet: FleetConfig,

    /// Total ticks to simulate with `Sim::run`.  Default: 600.
    pub total_ticks: u64,

    /// Master RNG seed for generated traffic.  The same seed always produces
    /// the same calls.
    pub seed: u64,

    /// Emit a unit snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fleet:                   FleetConfig::default(),
            total_ticks:             600,
            seed:                    42,
            snapshot_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// The tick at which `Sim::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    pub fn validate(&self) -> LiftResult<()> {
        self.fleet.validate()
    }
}
