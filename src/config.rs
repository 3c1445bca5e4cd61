use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "PressureJournal";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Database file inside the data directory
pub const DATABASE_FILE: &str = "journal.db";

/// Get the application data directory
/// ~/PressureJournal/ on all platforms; `None` when there is no home directory.
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_NAME))
}

/// Get the journal database path
pub fn database_path() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join(DATABASE_FILE))
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "pressure_journal=info"
}
