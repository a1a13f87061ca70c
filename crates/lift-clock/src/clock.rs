//! The `Clock` capability and its two implementations.
//!
//! The engine never blocks: a unit that starts moving asks the clock to fire
//! a [`Timer`] after the travel time and returns immediately.  Whoever drives
//! the simulation pops due timers off the clock and feeds them back to the
//! dispatcher, one at a time.
//!
//! | Clock             | Behaviour of `pop_due` / `advance_to`                  |
//! |-------------------|--------------------------------------------------------|
//! | [`VirtualClock`]  | Jumps straight to the due tick.  Used by tests.        |
//! | [`RealTimeClock`] | Sleeps until the matching wall-clock instant first.    |

use std::thread;
use std::time::Instant;

use log::trace;

use lift_core::{Tick, TimeScale, UnitId};

use crate::{Timer, TimerQueue};

/// Deferred-callback capability injected into units and the dispatcher.
pub trait Clock {
    /// The current simulation tick.
    fn now(&self) -> Tick;

    /// Schedule `timer` to fire `delay` ticks from now.  A zero delay fires
    /// at the current tick, after any timers already due.
    ///
    /// Returns the tick the timer is due at.
    fn after(&mut self, delay: u64, timer: Timer) -> Tick;

    /// The earliest tick at which a timer is due, if any.
    fn next_due(&self) -> Option<Tick>;

    /// Remove the earliest timer if it is due at or before `until`, moving
    /// `now` forward to its due tick.
    fn pop_due(&mut self, until: Tick) -> Option<(Tick, Timer)>;

    /// Move `now` forward to `tick`.  Never moves backwards.
    fn advance_to(&mut self, tick: Tick);

    /// Number of outstanding timers.
    fn pending(&self) -> usize;

    /// Number of outstanding timers owned by `unit`.
    fn pending_for(&self, unit: UnitId) -> usize;
}

// ── VirtualClock ──────────────────────────────────────────────────────────────

/// A clock that only moves when told to.  Time passes instantly, so timing
/// scenarios run deterministically and without waiting.
#[derive(Default, Debug)]
pub struct VirtualClock {
    now:    Tick,
    timers: TimerQueue,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock whose current tick is `now`.
    pub fn starting_at(now: Tick) -> Self {
        Self { now, timers: TimerQueue::new() }
    }

    /// Read-only view of the queued timers.
    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Tick {
        self.now
    }

    fn after(&mut self, delay: u64, timer: Timer) -> Tick {
        let due = self.now + delay;
        trace!("{} scheduled {timer} for {due}", self.now);
        self.timers.push(due, timer);
        due
    }

    fn next_due(&self) -> Option<Tick> {
        self.timers.next_tick()
    }

    fn pop_due(&mut self, until: Tick) -> Option<(Tick, Timer)> {
        let (due, timer) = self.timers.pop_due(until)?;
        self.now = self.now.max(due);
        Some((due, timer))
    }

    fn advance_to(&mut self, tick: Tick) {
        self.now = self.now.max(tick);
    }

    fn pending(&self) -> usize {
        self.timers.len()
    }

    fn pending_for(&self, unit: UnitId) -> usize {
        self.timers.count_for(unit)
    }
}

// ── RealTimeClock ─────────────────────────────────────────────────────────────

/// A clock paced against the wall clock.
///
/// Tick `t` corresponds to `origin + t * tick_duration_ms`.  Popping a timer
/// or advancing to a tick sleeps the calling thread until that instant has
/// passed; if the driver is running late, no sleep happens and the
/// simulation catches up.
pub struct RealTimeClock {
    inner:  VirtualClock,
    scale:  TimeScale,
    origin: Instant,
}

impl RealTimeClock {
    /// A clock whose tick 0 is "now" on the wall clock.
    pub fn new(scale: TimeScale) -> Self {
        Self {
            inner:  VirtualClock::new(),
            scale,
            origin: Instant::now(),
        }
    }

    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    fn wait_until(&self, tick: Tick) {
        let target = self.origin + self.scale.duration(tick.0);
        let now = Instant::now();
        if target > now {
            thread::sleep(target - now);
        }
    }
}

impl Clock for RealTimeClock {
    fn now(&self) -> Tick {
        self.inner.now()
    }

    fn after(&mut self, delay: u64, timer: Timer) -> Tick {
        self.inner.after(delay, timer)
    }

    fn next_due(&self) -> Option<Tick> {
        self.inner.next_due()
    }

    fn pop_due(&mut self, until: Tick) -> Option<(Tick, Timer)> {
        let due = self.inner.next_due().filter(|&t| t <= until)?;
        self.wait_until(due);
        self.inner.pop_due(until)
    }

    fn advance_to(&mut self, tick: Tick) {
        self.wait_until(tick);
        self.inner.advance_to(tick);
    }

    fn pending(&self) -> usize {
        self.inner.pending()
    }

    fn pending_for(&self, unit: UnitId) -> usize {
        self.inner.pending_for(unit)
    }
}
