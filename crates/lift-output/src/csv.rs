//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `events.csv`
//! - `unit_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{EventRow, OutputResult, TickSummaryRow, UnitSnapshotRow};
use crate::writer::OutputWriter;

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    events:     Writer<File>,
    snapshots:  Writer<File>,
    summaries:  Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    ///
    /// `dir` is created if it does not exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record([
            "tick", "kind", "unit_id", "floor", "state", "from_floor", "to_floor", "duration_ms",
            "detail",
        ])?;

        let mut snapshots = Writer::from_path(dir.join("unit_snapshots.csv"))?;
        snapshots.write_record([
            "tick", "unit_id", "floor", "state", "target_floor", "remaining_ticks", "queued_floors",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "pending_calls", "idle_units", "moving_units", "dwelling_units"])?;

        Ok(Self {
            events,
            snapshots,
            summaries,
            finished: false,
        })
    }
}

/// Empty cell for `None`.
fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.tick.to_string(),
                row.kind.to_owned(),
                cell(row.unit_id),
                cell(row.floor),
                cell(row.state),
                cell(row.from_floor),
                cell(row.to_floor),
                cell(row.duration_ms),
                cell(row.detail.as_deref()),
            ])?;
        }
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[UnitSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.unit_id.to_string(),
                row.floor.to_string(),
                row.state.to_owned(),
                cell(row.target_floor),
                row.remaining_ticks.to_string(),
                row.queued_floors.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.pending_calls.to_string(),
            row.idle_units.to_string(),
            row.moving_units.to_string(),
            row.dwelling_units.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
