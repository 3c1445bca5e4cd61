use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{EnrichedReading, MedicationDose, Reading};

const STORED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Append an enriched reading. Its derived fields are stored as computed and
/// never recomputed on load.
pub fn insert_reading(conn: &Connection, entry: &EnrichedReading) -> Result<(), DatabaseError> {
    let reading = &entry.reading;
    conn.execute(
        "INSERT INTO readings (id, recorded_at, systolic, diastolic, heart_rate, posture,
         symptoms, medications, note, pulse_pressure, mean_arterial_pressure,
         severity_level, orthostatic)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            entry.id,
            reading.timestamp.format(STORED_TIMESTAMP_FORMAT).to_string(),
            reading.systolic,
            reading.diastolic,
            reading.heart_rate,
            reading.posture.as_str(),
            serde_json::to_string(&reading.symptoms)?,
            serde_json::to_string(&reading.medications)?,
            reading.note,
            entry.pulse_pressure,
            entry.mean_arterial_pressure,
            entry.severity_level.as_str(),
            entry.orthostatic_flag,
        ],
    )?;
    Ok(())
}

/// Load the full history in insertion order.
pub fn load_history(conn: &Connection) -> Result<Vec<EnrichedReading>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, recorded_at, systolic, diastolic, heart_rate, posture, symptoms,
                medications, note, pulse_pressure, mean_arterial_pressure,
                severity_level, orthostatic
         FROM readings
         ORDER BY seq ASC",
    )?;
    let rows = stmt.query_map([], row_to_reading)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

pub fn count_readings(conn: &Connection) -> Result<u32, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM readings", [], |row| row.get(0))?;
    Ok(count)
}

/// Delete every reading. Returns the number removed.
pub fn clear_readings(conn: &Connection) -> Result<usize, DatabaseError> {
    let removed = conn.execute("DELETE FROM readings", [])?;
    Ok(removed)
}

fn conversion_error(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn row_to_reading(row: &rusqlite::Row) -> Result<EnrichedReading, rusqlite::Error> {
    let recorded_str: String = row.get(1)?;
    let posture_str: String = row.get(5)?;
    let symptoms_json: String = row.get(6)?;
    let medications_json: String = row.get(7)?;
    let level_str: String = row.get(11)?;

    let symptoms: Vec<String> =
        serde_json::from_str(&symptoms_json).map_err(|e| conversion_error(6, e))?;
    let medications: Vec<MedicationDose> =
        serde_json::from_str(&medications_json).map_err(|e| conversion_error(7, e))?;

    Ok(EnrichedReading {
        id: row.get(0)?,
        reading: Reading {
            timestamp: NaiveDateTime::parse_from_str(&recorded_str, STORED_TIMESTAMP_FORMAT)
                .map_err(|e| conversion_error(1, e))?,
            systolic: row.get(2)?,
            diastolic: row.get(3)?,
            heart_rate: row.get(4)?,
            posture: posture_str.parse().map_err(|e| conversion_error(5, e))?,
            symptoms,
            medications,
            note: row.get(8)?,
        },
        pulse_pressure: row.get(9)?,
        mean_arterial_pressure: row.get(10)?,
        severity_level: level_str.parse().map_err(|e| conversion_error(11, e))?,
        orthostatic_flag: row.get(12)?,
    })
}
