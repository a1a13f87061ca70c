//! Scripted passenger calls and the CSV call-script loader.
//!
//! # CSV format
//!
//! One row per call.  Rows need not be sorted; calls sharing a tick keep
//! their file order.
//!
//! ```csv
//! tick,floor
//! 0,7
//! 1,2
//! 1,9
//! 30,0
//! ```
//!
//! `floor` is read as a signed integer and is **not** checked at load time:
//! out-of-range floors reach the dispatcher like any other passenger input
//! and are rejected there (see [`SimObserver::on_call_rejected`]).
//!
//! [`SimObserver::on_call_rejected`]: crate::SimObserver::on_call_rejected

use std::collections::VecDeque;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use lift_core::Tick;

use crate::{SimError, SimResult};

// ── ScheduledCall / CallScript ────────────────────────────────────────────────

/// One passenger call placed at a fixed tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScheduledCall {
    pub tick:  Tick,
    pub floor: i64,
}

impl ScheduledCall {
    pub fn new(tick: u64, floor: i64) -> Self {
        Self { tick: Tick(tick), floor }
    }
}

/// Calls ordered by tick, consumed front to back as the simulation runs.
#[derive(Clone, Debug, Default)]
pub struct CallScript {
    calls: VecDeque<ScheduledCall>,
}

impl CallScript {
    /// Sort `calls` by tick.  The sort is stable, so same-tick calls keep
    /// their relative order.
    pub fn new(mut calls: Vec<ScheduledCall>) -> Self {
        calls.sort_by_key(|c| c.tick);
        Self { calls: calls.into() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Tick of the next call still to be placed.
    pub fn next_tick(&self) -> Option<Tick> {
        self.calls.front().map(|c| c.tick)
    }

    /// Remove the next call if it is due at or before `now`.
    pub fn pop_due(&mut self, now: Tick) -> Option<ScheduledCall> {
        if self.next_tick()? <= now {
            self.calls.pop_front()
        } else {
            None
        }
    }

    /// Remaining calls in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &ScheduledCall> {
        self.calls.iter()
    }
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CallRecord {
    tick:  u64,
    floor: i64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`CallScript`] from a CSV file.
pub fn load_calls_csv(path: &Path) -> SimResult<CallScript> {
    let file = std::fs::File::open(path)?;
    load_calls_reader(file)
}

/// Like [`load_calls_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor` or a byte slice).
pub fn load_calls_reader<R: Read>(reader: R) -> SimResult<CallScript> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let calls = csv_reader
        .deserialize::<CallRecord>()
        .map(|result| {
            let row = result.map_err(|e| SimError::Parse(e.to_string()))?;
            Ok(ScheduledCall::new(row.tick, row.floor))
        })
        .collect::<SimResult<Vec<_>>>()?;

    Ok(CallScript::new(calls))
}
