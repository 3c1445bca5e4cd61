pub mod aggregates; // Time windows, day-part averages, postural pairs
pub mod config;
pub mod db;
pub mod interchange; // CSV / JSON import and export
pub mod journal; // Owning layer: history, persistence, dashboard
pub mod metrics; // Classification engine
pub mod models;
pub mod presentation; // Labels, colors, chart view models

pub use aggregates::{
    bucket_by_day_part, filter_by_window, find_postural_pairs, latest, DayPart, DayPartAverage,
    PosturalPair, TimeWindow,
};
pub use journal::{Dashboard, ImportReport, Journal, JournalError};
pub use metrics::{
    assess, classify, detect_orthostatic, enrich, mean_arterial_pressure, pulse_pressure,
    Assessment,
};
pub use models::{
    EnrichedReading, MedicationDose, Posture, RawReading, RawValue, Reading, SeverityLevel,
    ValidationError,
};

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber. Honours `RUST_LOG`, falling back
/// to `config::default_log_filter()`. Calling it twice is harmless.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}
