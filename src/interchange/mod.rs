//! File interchange for the journal: the CSV dialect used by the entry page's
//! export/paste features, and plain JSON.
//!
//! Importers only produce `RawReading`s. Validation and enrichment happen in
//! the journal, one record at a time, exactly as for typed-in readings.

pub mod csv;
pub mod json;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterchangeError {
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing column: {0}")]
    MissingColumn(&'static str),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// A record read from a file, with the line it came from (1-based).
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedRow {
    pub line: u64,
    pub reading: crate::models::RawReading,
}
