//! The `OutputWriter` trait implemented by all backend writers.

use crate::{EventRow, OutputResult, TickSummaryRow, UnitSnapshotRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of fleet events, in emission order.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Write a batch of unit snapshots.
    fn write_snapshots(&mut self, rows: &[UnitSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
