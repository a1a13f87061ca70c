//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  One tick
//! is one engine time unit: travel costs `per_floor_ticks` per floor and a
//! dwell lasts `dwell_ticks`.  The mapping to wall-clock time is held in
//! `TimeScale`:
//!
//!   wall_ms = tick * tick_duration_ms
//!
//! Using an integer tick as the canonical unit keeps all timing arithmetic
//! exact, so "arrives at tick 12, idle at tick 14" can be asserted directly.
//!
//! The default tick duration is 1,000 ms, matching a 3 s/floor, 2 s dwell
//! elevator.

use std::fmt;
use std::time::Duration;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.  Addition saturates at `u64::MAX`,
/// so an absurdly long leg is simply never due.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Ticks elapsed from `earlier` to `self`, or 0 if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TimeScale ─────────────────────────────────────────────────────────────────

/// Converts between tick counts and wall-clock milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeScale {
    /// How many real milliseconds one tick represents.  Default: 1000.
    pub tick_duration_ms: u32,
}

impl Default for TimeScale {
    fn default() -> Self {
        Self { tick_duration_ms: 1_000 }
    }
}

impl TimeScale {
    pub fn new(tick_duration_ms: u32) -> Self {
        Self { tick_duration_ms }
    }

    /// Milliseconds spanned by `ticks`.
    #[inline]
    pub fn ms_for_ticks(&self, ticks: u64) -> u64 {
        ticks.saturating_mul(self.tick_duration_ms as u64)
    }

    /// How many ticks span `ms` milliseconds? (rounds up)
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.tick_duration_ms.max(1) as u64)
    }

    /// `ticks` as a `std::time::Duration`, for real-time pacing.
    #[inline]
    pub fn duration(&self, ticks: u64) -> Duration {
        Duration::from_millis(self.ms_for_ticks(ticks))
    }

    /// Break the wall time of `ticks` into (minutes, seconds).
    pub fn min_sec(&self, ticks: u64) -> (u64, u64) {
        let secs = self.ms_for_ticks(ticks) / 1_000;
        (secs / 60, secs % 60)
    }
}
