//! Presentation helpers: display labels, chart colors and the view models the
//! entry page renders (time series, MAP gauge, headline card, history table).
//!
//! The metrics engine never calls into this module; it only hands over
//! `SeverityLevel` values and readings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::aggregates::{filter_by_window, latest, TimeWindow};
use crate::models::enums::str_enum;
use crate::models::{EnrichedReading, Posture, SeverityLevel, ValidationError};

/// Upper end of the MAP gauge scale (mmHg).
pub const MAP_GAUGE_MAX: u16 = 150;

const FALLBACK_COLOR: &str = "#888888";

pub fn level_label(level: SeverityLevel) -> &'static str {
    match level {
        SeverityLevel::Low => "低血压",
        SeverityLevel::Normal => "正常",
        SeverityLevel::Elevated => "升高",
        SeverityLevel::Stage1 => "1级高血压",
        SeverityLevel::Stage2 => "2级高血压",
        SeverityLevel::Crisis => "危象",
    }
}

pub fn level_color(level: SeverityLevel) -> &'static str {
    match level {
        SeverityLevel::Low => "#6495ED",
        SeverityLevel::Normal => "#2E8B57",
        SeverityLevel::Elevated => "#CCCC00",
        SeverityLevel::Stage1 => "#FFA500",
        SeverityLevel::Stage2 => "#FF4500",
        SeverityLevel::Crisis => "#8B0000",
    }
}

/// Label lookup for a stored level string. Unknown values are shown as-is.
pub fn label_for(level: &str) -> String {
    level
        .parse::<SeverityLevel>()
        .map(|l| level_label(l).to_string())
        .unwrap_or_else(|_| level.to_string())
}

/// Color lookup for a stored level string, grey when unknown.
pub fn color_for(level: &str) -> &'static str {
    level
        .parse::<SeverityLevel>()
        .map(level_color)
        .unwrap_or(FALLBACK_COLOR)
}

// ---------------------------------------------------------------------------
// Chart view models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub timestamp: NaiveDateTime,
    pub systolic: u16,
    pub diastolic: u16,
    /// Gap in the heart-rate line when absent.
    pub heart_rate: Option<u16>,
}

/// Points for the pressure/heart-rate line chart, oldest first.
pub fn time_series(
    history: &[EnrichedReading],
    window: TimeWindow,
    now: NaiveDateTime,
) -> Vec<TimeSeriesPoint> {
    filter_by_window(history, window, now)
        .into_iter()
        .map(|entry| TimeSeriesPoint {
            timestamp: entry.reading.timestamp,
            systolic: entry.reading.systolic,
            diastolic: entry.reading.diastolic,
            heart_rate: entry.reading.heart_rate,
        })
        .collect()
}

/// Bullet bar showing the headline reading's MAP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapGauge {
    pub value: u16,
    pub max: u16,
    pub color: String,
}

pub fn map_gauge(history: &[EnrichedReading]) -> Option<MapGauge> {
    latest(history).map(|entry| MapGauge {
        value: entry.mean_arterial_pressure,
        max: MAP_GAUGE_MAX,
        color: level_color(entry.severity_level).to_string(),
    })
}

/// Headline card for the last appended reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestSummary {
    pub id: String,
    pub timestamp: NaiveDateTime,
    pub pressure: String,
    pub heart_rate: Option<u16>,
    pub mean_arterial_pressure: u16,
    pub pulse_pressure: i32,
    pub severity_level: SeverityLevel,
    pub level_label: String,
    pub orthostatic_suspected: bool,
}

pub fn latest_summary(history: &[EnrichedReading]) -> Option<LatestSummary> {
    latest(history).map(|entry| LatestSummary {
        id: entry.id.clone(),
        timestamp: entry.reading.timestamp,
        pressure: format!("{}/{}", entry.reading.systolic, entry.reading.diastolic),
        heart_rate: entry.reading.heart_rate,
        mean_arterial_pressure: entry.mean_arterial_pressure,
        pulse_pressure: entry.pulse_pressure,
        severity_level: entry.severity_level,
        level_label: level_label(entry.severity_level).to_string(),
        orthostatic_suspected: entry.orthostatic_flag,
    })
}

// ---------------------------------------------------------------------------
// History table
// ---------------------------------------------------------------------------

/// One row of the history table, flattened for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub id: String,
    pub timestamp: NaiveDateTime,
    pub systolic: u16,
    pub diastolic: u16,
    pub heart_rate: Option<u16>,
    pub mean_arterial_pressure: u16,
    pub pulse_pressure: i32,
    pub severity_level: SeverityLevel,
    pub level_label: String,
    pub posture: Posture,
    pub orthostatic: bool,
    pub symptoms: String,
    pub medications: String,
    pub note: String,
}

impl HistoryRow {
    fn from_entry(entry: &EnrichedReading) -> Self {
        let medications = entry
            .reading
            .medications
            .iter()
            .map(|m| {
                if m.dose.is_empty() {
                    m.name.clone()
                } else {
                    format!("{}({})", m.name, m.dose)
                }
            })
            .collect::<Vec<_>>()
            .join(",");

        HistoryRow {
            id: entry.id.clone(),
            timestamp: entry.reading.timestamp,
            systolic: entry.reading.systolic,
            diastolic: entry.reading.diastolic,
            heart_rate: entry.reading.heart_rate,
            mean_arterial_pressure: entry.mean_arterial_pressure,
            pulse_pressure: entry.pulse_pressure,
            severity_level: entry.severity_level,
            level_label: level_label(entry.severity_level).to_string(),
            posture: entry.reading.posture,
            orthostatic: entry.orthostatic_flag,
            symptoms: entry.reading.symptoms.join(","),
            medications,
            note: entry.reading.note.clone(),
        }
    }
}

/// Table rows, most recently appended first.
pub fn history_rows(history: &[EnrichedReading]) -> Vec<HistoryRow> {
    history.iter().rev().map(HistoryRow::from_entry).collect()
}

str_enum!(SortField {
    Timestamp => "ts",
    Systolic => "sbp",
    Diastolic => "dbp",
    HeartRate => "hr",
});

str_enum!(SortOrder {
    Ascending => "asc",
    Descending => "desc",
});

/// A sorted copy of the history for the table's column headers.
/// The history itself keeps its insertion order.
pub fn sort_readings(
    history: &[EnrichedReading],
    field: SortField,
    order: SortOrder,
) -> Vec<EnrichedReading> {
    let mut sorted = history.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = match field {
            SortField::Timestamp => a.reading.timestamp.cmp(&b.reading.timestamp),
            SortField::Systolic => a.reading.systolic.cmp(&b.reading.systolic),
            SortField::Diastolic => a.reading.diastolic.cmp(&b.reading.diastolic),
            // `None` sorts before any value.
            SortField::HeartRate => a.reading.heart_rate.cmp(&b.reading.heart_rate),
        };
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    sorted
}

/// Parses the table header's `data-field` / `data-order` pair.
pub fn parse_sort(field: &str, order: &str) -> Result<(SortField, SortOrder), ValidationError> {
    Ok((field.parse()?, order.parse()?))
}
