//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `events`, `unit_snapshots` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::{EventRow, OutputResult, TickSummaryRow, UnitSnapshotRow};
use crate::writer::OutputWriter;

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS events (
                 seq         INTEGER PRIMARY KEY AUTOINCREMENT,
                 tick        INTEGER NOT NULL,
                 kind        TEXT    NOT NULL,
                 unit_id     INTEGER,
                 floor       INTEGER,
                 state       TEXT,
                 from_floor  INTEGER,
                 to_floor    INTEGER,
                 duration_ms INTEGER,
                 detail      TEXT
             );
             CREATE TABLE IF NOT EXISTS unit_snapshots (
                 tick            INTEGER NOT NULL,
                 unit_id         INTEGER NOT NULL,
                 floor           INTEGER NOT NULL,
                 state           TEXT    NOT NULL,
                 target_floor    INTEGER,
                 remaining_ticks INTEGER NOT NULL,
                 queued_floors   TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick           INTEGER PRIMARY KEY,
                 pending_calls  INTEGER NOT NULL,
                 idle_units     INTEGER NOT NULL,
                 moving_units   INTEGER NOT NULL,
                 dwelling_units INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO events \
                 (tick, kind, unit_id, floor, state, from_floor, to_floor, duration_ms, detail) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.kind,
                    row.unit_id,
                    row.floor,
                    row.state,
                    row.from_floor,
                    row.to_floor,
                    row.duration_ms,
                    row.detail,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[UnitSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO unit_snapshots \
                 (tick, unit_id, floor, state, target_floor, remaining_ticks, queued_floors) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.unit_id,
                    row.floor,
                    row.state,
                    row.target_floor,
                    row.remaining_ticks,
                    row.queued_floors,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, pending_calls, idle_units, moving_units, dwelling_units) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                row.tick,
                row.pending_calls,
                row.idle_units,
                row.moving_units,
                row.dwelling_units,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
