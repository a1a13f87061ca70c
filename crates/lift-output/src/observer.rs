//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use lift_core::{LiftError, SimConfig, Tick};
use lift_fleet::{Dispatcher, FleetEvent, FleetObserver};
use lift_sim::SimObserver;

use crate::row::{EventRow, TickSummaryRow, UnitSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes fleet events, unit snapshots, and tick
/// summaries to any [`OutputWriter`] backend (CSV, SQLite, …).
///
/// Events are buffered and written in one batch at the end of each tick.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:            W,
    snapshot_interval: u64,
    events:            Vec<EventRow>,
    last_error:        Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, taking the snapshot interval
    /// from `config`.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            snapshot_interval: config.snapshot_interval_ticks,
            events:            Vec::new(),
            last_error:        None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Write buffered events and finish the writer.  [`Sim::run`] does this
    /// through `on_sim_end`; call it after driving the sim with `run_ticks`
    /// or `settle`.
    ///
    /// [`Sim::run`]: lift_sim::Sim::run
    pub fn finish(&mut self) -> OutputResult<()> {
        self.flush_events()?;
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_events(&mut self) -> OutputResult<()> {
        if self.events.is_empty() {
            return Ok(());
        }
        let result = self.writer.write_events(&self.events);
        self.events.clear();
        result
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> FleetObserver for SimOutputObserver<W> {
    fn on_event(&mut self, tick: Tick, event: &FleetEvent) {
        self.events.push(EventRow::from_event(tick, event));
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_call_rejected(&mut self, tick: Tick, floor: i64, error: &LiftError) {
        self.events.push(EventRow::call_rejected(tick, floor, error));
    }

    fn on_tick_end(&mut self, tick: Tick, fleet: &Dispatcher) {
        let result = self.flush_events();
        self.store_err(result);

        let result = self.writer.write_tick_summary(&TickSummaryRow::from_fleet(tick, fleet));
        self.store_err(result);

        if self.snapshot_interval > 0 && tick.0.is_multiple_of(self.snapshot_interval) {
            let rows: Vec<UnitSnapshotRow> = fleet
                .units()
                .iter()
                .map(|unit| UnitSnapshotRow::from_unit(tick, unit))
                .collect();
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _fleet: &Dispatcher) {
        let result = self.finish();
        self.store_err(result);
    }
}
