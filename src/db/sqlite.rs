use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use super::DatabaseError;

/// Version written by `001_readings.sql`.
pub const SCHEMA_VERSION: i64 = 1;

const SCHEMA_SQL: &str = include_str!("../../resources/migrations/001_readings.sql");

/// Opens the journal file at `path`, creating the schema on first use.
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    let conn = prepare(Connection::open(path)?)?;
    tracing::info!(path = %path.display(), "Journal database opened");
    Ok(conn)
}

pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    prepare(Connection::open_in_memory()?)
}

fn prepare(conn: Connection) -> Result<Connection, DatabaseError> {
    conn.execute_batch("PRAGMA synchronous=FULL;")?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Creates the readings schema on an empty database. A file already at
/// `SCHEMA_VERSION` is left alone; a newer one is refused.
pub fn ensure_schema(conn: &Connection) -> Result<(), DatabaseError> {
    match schema_version(conn)? {
        None => {
            tracing::info!(version = SCHEMA_VERSION, "Creating journal schema");
            conn.execute_batch(SCHEMA_SQL)
                .map_err(|e| DatabaseError::MigrationFailed {
                    version: SCHEMA_VERSION,
                    reason: e.to_string(),
                })
        }
        Some(SCHEMA_VERSION) => Ok(()),
        Some(found) => Err(DatabaseError::MigrationFailed {
            version: found,
            reason: format!("unsupported schema version (expected {SCHEMA_VERSION})"),
        }),
    }
}

/// Stored schema version, `None` on a database without the version table.
pub fn schema_version(conn: &Connection) -> Result<Option<i64>, DatabaseError> {
    let has_table = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !has_table {
        return Ok(None);
    }

    let version = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get::<_, Option<i64>>(0)
    })?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_gets_current_version() {
        let conn = open_memory_database().unwrap();
        assert_eq!(schema_version(&conn).unwrap(), Some(SCHEMA_VERSION));
    }

    #[test]
    fn bare_connection_has_no_version() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(schema_version(&conn).unwrap(), None);
    }

    #[test]
    fn ensure_schema_twice_keeps_one_version_row() {
        let conn = open_memory_database().unwrap();
        ensure_schema(&conn).unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn newer_schema_is_refused() {
        let conn = open_memory_database().unwrap();
        conn.execute("INSERT INTO schema_version (version) VALUES (7)", [])
            .unwrap();
        assert!(matches!(
            ensure_schema(&conn),
            Err(DatabaseError::MigrationFailed { version: 7, .. })
        ));
    }

    #[test]
    fn reopening_a_journal_file_keeps_readings_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.db");
        drop(open_database(&path).unwrap());
        assert!(path.exists());

        let conn = open_database(&path).unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'readings'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }
}
