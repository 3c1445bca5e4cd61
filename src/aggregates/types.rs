use serde::{Deserialize, Serialize};

use crate::models::{EnrichedReading, ValidationError};

/// Lookback used by the charts: the last N days up to now, or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    Days(u32),
    All,
}

impl std::str::FromStr for TimeWindow {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(TimeWindow::All);
        }
        match s.parse::<u32>() {
            Ok(days) if days > 0 => Ok(TimeWindow::Days(days)),
            _ => Err(ValidationError::InvalidWindow(s.to_string())),
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeWindow::Days(days) => write!(f, "{days}"),
            TimeWindow::All => f.write_str("all"),
        }
    }
}

/// Fixed local time-of-day ranges used for averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPart {
    /// 05:00–11:59
    Morning,
    /// 12:00–17:59
    Afternoon,
    /// 18:00–23:59
    Evening,
    /// 00:00–04:59
    Night,
}

impl DayPart {
    /// Display order of the buckets.
    pub const ALL: [DayPart; 4] = [
        DayPart::Morning,
        DayPart::Afternoon,
        DayPart::Evening,
        DayPart::Night,
    ];

    pub fn for_hour(hour: u32) -> Self {
        match hour {
            5..=11 => DayPart::Morning,
            12..=17 => DayPart::Afternoon,
            18..=23 => DayPart::Evening,
            _ => DayPart::Night,
        }
    }

    pub fn index(self) -> usize {
        match self {
            DayPart::Morning => 0,
            DayPart::Afternoon => 1,
            DayPart::Evening => 2,
            DayPart::Night => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayPart::Morning => "morning",
            DayPart::Afternoon => "afternoon",
            DayPart::Evening => "evening",
            DayPart::Night => "night",
        }
    }
}

/// Mean pressures for one day-part. Empty buckets report 0.0, not NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPartAverage {
    pub day_part: DayPart,
    pub count: usize,
    pub avg_systolic: f64,
    pub avg_diastolic: f64,
}

/// A standing reading and the lying reading appended right before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosturalPair {
    pub lying: EnrichedReading,
    pub standing: EnrichedReading,
    pub systolic_drop: i32,
    pub diastolic_drop: i32,
    pub orthostatic: bool,
}
