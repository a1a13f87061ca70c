//! `TimerQueue` — sparse tick-ordered timer storage.
//!
//! Timers are bucketed by the tick they are due at.  Within a bucket they
//! fire in the order they were scheduled, so two timers due at the same tick
//! never race: the one scheduled first always fires first.
//!
//! `BTreeMap` gives O(log W) insert and pop where W is the number of distinct
//! due ticks.  A fleet has at most one outstanding timer per unit, so W is
//! bounded by the fleet size.

use std::collections::{BTreeMap, VecDeque};

use lift_core::{Tick, UnitId};

use crate::Timer;

/// A priority queue mapping simulation ticks → timers due at that tick.
#[derive(Default, Debug)]
pub struct TimerQueue {
    inner: BTreeMap<Tick, VecDeque<Timer>>,
    /// Cached total timer count for O(1) `len()`.
    total: usize,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `timer` to fire at `tick`, after every timer already due then.
    pub fn push(&mut self, tick: Tick, timer: Timer) {
        self.inner.entry(tick).or_default().push_back(timer);
        self.total += 1;
    }

    /// Remove and return the earliest timer if it is due at or before `until`.
    pub fn pop_due(&mut self, until: Tick) -> Option<(Tick, Timer)> {
        let mut entry = self.inner.first_entry()?;
        let tick = *entry.key();
        if tick > until {
            return None;
        }
        let timer = entry.get_mut().pop_front()?;
        if entry.get().is_empty() {
            entry.remove();
        }
        self.total -= 1;
        Some((tick, timer))
    }

    /// The earliest tick with at least one queued timer, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Number of queued timers belonging to `unit`.
    pub fn count_for(&self, unit: UnitId) -> usize {
        self.inner
            .values()
            .flat_map(|bucket| bucket.iter())
            .filter(|t| t.unit == unit)
            .count()
    }

    /// Total number of queued timers across all future ticks.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
