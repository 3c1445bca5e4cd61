//! Blood-pressure journal: the owning layer around the metrics engine.
//!
//! Holds the single mutable history (mirrored in SQLite), enriches each new
//! reading against the history as it stands at that moment, appends it, and
//! assembles the dashboard payload. Imports go through the same path one
//! record at a time.

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aggregates::{
    bucket_by_day_part, find_postural_pairs, DayPartAverage, PosturalPair, TimeWindow,
};
use crate::config;
use crate::db::{self, DatabaseError};
use crate::interchange::{self, ImportedRow, InterchangeError};
use crate::metrics::enrich;
use crate::models::{EnrichedReading, RawReading, ValidationError};
use crate::presentation::{
    latest_summary, map_gauge, time_series, LatestSummary, MapGauge, TimeSeriesPoint,
};

// ═══════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Import/export error: {0}")]
    Interchange(#[from] InterchangeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot determine home directory")]
    NoDataDir,
}

// ═══════════════════════════════════════════
// View types
// ═══════════════════════════════════════════

/// A row an import skipped, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported: usize,
    pub rejected: Vec<RejectedRow>,
}

/// Everything the charts and summary cards need, in one payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub window: TimeWindow,
    pub time_series: Vec<TimeSeriesPoint>,
    pub day_parts: Vec<DayPartAverage>,
    pub postural_pairs: Vec<PosturalPair>,
    pub latest: Option<LatestSummary>,
    pub map_gauge: Option<MapGauge>,
}

// ═══════════════════════════════════════════
// Journal
// ═══════════════════════════════════════════

pub struct Journal {
    conn: Connection,
    history: Vec<EnrichedReading>,
}

impl Journal {
    /// Opens (or creates) the journal database at `path`.
    pub fn open(path: &Path) -> Result<Self, JournalError> {
        Self::from_connection(db::open_database(path)?)
    }

    /// Opens the journal in the per-user data directory.
    pub fn open_default() -> Result<Self, JournalError> {
        let path = config::database_path().ok_or(JournalError::NoDataDir)?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        Self::open(&path)
    }

    pub fn open_in_memory() -> Result<Self, JournalError> {
        Self::from_connection(db::open_memory_database()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, JournalError> {
        let history = db::load_history(&conn)?;
        tracing::info!(readings = history.len(), "Journal loaded");
        Ok(Journal { conn, history })
    }

    /// History in insertion order.
    pub fn history(&self) -> &[EnrichedReading] {
        &self.history
    }

    pub fn latest(&self) -> Option<&EnrichedReading> {
        crate::aggregates::latest(&self.history)
    }

    /// Enriches a new reading against the current history, stores it and
    /// appends it. Malformed input is rejected before anything is written.
    pub fn record(&mut self, raw: &RawReading) -> Result<EnrichedReading, JournalError> {
        let entry = enrich(raw, &self.history)?;
        db::insert_reading(&self.conn, &entry)?;
        self.history.push(entry.clone());

        tracing::info!(
            id = %entry.id,
            level = %entry.severity_level,
            orthostatic = entry.orthostatic_flag,
            "Reading recorded"
        );
        Ok(entry)
    }

    /// Deletes every reading. Returns how many were removed.
    pub fn clear(&mut self) -> Result<usize, JournalError> {
        let removed = db::clear_readings(&self.conn)?;
        self.history.clear();
        tracing::info!(removed, "Journal cleared");
        Ok(removed)
    }

    pub fn import_csv(&mut self, text: &str) -> Result<ImportReport, JournalError> {
        let rows = interchange::csv::parse_csv(text)?;
        self.import_rows(rows)
    }

    pub fn import_json(&mut self, text: &str) -> Result<ImportReport, JournalError> {
        let rows = interchange::json::parse_json(text)?;
        self.import_rows(rows)
    }

    /// Each row is enriched against the history including the rows accepted
    /// before it. Invalid rows are skipped and reported; the accepted rows are
    /// written in one transaction.
    fn import_rows(&mut self, rows: Vec<ImportedRow>) -> Result<ImportReport, JournalError> {
        let mut working = self.history.clone();
        let mut report = ImportReport::default();

        let tx = self.conn.transaction()?;
        for row in rows {
            match enrich(&row.reading, &working) {
                Ok(entry) => {
                    db::insert_reading(&tx, &entry)?;
                    working.push(entry);
                    report.imported += 1;
                }
                Err(e) => {
                    tracing::warn!(line = row.line, error = %e, "Skipping invalid import row");
                    report.rejected.push(RejectedRow {
                        line: row.line,
                        reason: e.to_string(),
                    });
                }
            }
        }
        tx.commit()?;

        self.history = working;
        tracing::info!(
            imported = report.imported,
            rejected = report.rejected.len(),
            "Import finished"
        );
        Ok(report)
    }

    pub fn export_csv(&self) -> Result<String, JournalError> {
        Ok(interchange::csv::export_csv(&self.history)?)
    }

    pub fn export_json(&self) -> Result<String, JournalError> {
        Ok(interchange::json::export_json(&self.history)?)
    }

    /// Chart and card data for the given window, relative to `now`.
    pub fn dashboard(&self, window: TimeWindow, now: NaiveDateTime) -> Dashboard {
        Dashboard {
            window,
            time_series: time_series(&self.history, window, now),
            day_parts: bucket_by_day_part(&self.history),
            postural_pairs: find_postural_pairs(&self.history),
            latest: latest_summary(&self.history),
            map_gauge: map_gauge(&self.history),
        }
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
