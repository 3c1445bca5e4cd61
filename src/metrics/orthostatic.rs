use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::models::{EnrichedReading, Posture, Reading};

/// A lying reading further away than this is unrelated to the standing one.
pub const LOOKBACK_WINDOW_HOURS: i64 = 2;
pub const SYSTOLIC_DROP_THRESHOLD: i32 = 20;
pub const DIASTOLIC_DROP_THRESHOLD: i32 = 10;

/// Pressure change from a lying reading to a standing one. Positive = fell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressureDrop {
    pub systolic: i32,
    pub diastolic: i32,
}

impl PressureDrop {
    pub fn between(lying: &Reading, standing: &Reading) -> Self {
        PressureDrop {
            systolic: i32::from(lying.systolic) - i32::from(standing.systolic),
            diastolic: i32::from(lying.diastolic) - i32::from(standing.diastolic),
        }
    }

    pub fn is_orthostatic(&self) -> bool {
        self.systolic >= SYSTOLIC_DROP_THRESHOLD || self.diastolic >= DIASTOLIC_DROP_THRESHOLD
    }
}

/// Flags orthostatic hypotension for a standing reading.
///
/// Only the most recently appended lying reading is considered (reverse
/// insertion order, not a chronological search). If it lies outside the
/// lookback window the answer is `false`; older lying readings are not tried.
pub fn detect_orthostatic(candidate: &Reading, history: &[EnrichedReading]) -> bool {
    if candidate.posture != Posture::Standing {
        return false;
    }

    let Some(prev) = history
        .iter()
        .rev()
        .find(|entry| entry.reading.posture == Posture::Lying)
    else {
        return false;
    };

    let gap_ms = (candidate.timestamp - prev.reading.timestamp)
        .num_milliseconds()
        .abs();
    if gap_ms > Duration::hours(LOOKBACK_WINDOW_HOURS).num_milliseconds() {
        tracing::trace!(gap_ms, "lying reading outside lookback window");
        return false;
    }

    PressureDrop::between(&prev.reading, candidate).is_orthostatic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::enrich_reading;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 4, 10)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn reading(ts: NaiveDateTime, s: u16, d: u16, posture: Posture) -> Reading {
        Reading {
            timestamp: ts,
            systolic: s,
            diastolic: d,
            heart_rate: None,
            posture,
            symptoms: vec![],
            medications: vec![],
            note: String::new(),
        }
    }

    fn history_of(readings: Vec<Reading>) -> Vec<EnrichedReading> {
        let mut history = Vec::new();
        for r in readings {
            let enriched = enrich_reading(r, &history);
            history.push(enriched);
        }
        history
    }

    #[test]
    fn drop_within_window_is_flagged() {
        let history = history_of(vec![reading(at(8, 0), 160, 100, Posture::Lying)]);
        let standing = reading(at(8, 30), 135, 95, Posture::Standing);
        assert!(detect_orthostatic(&standing, &history));
    }

    #[test]
    fn same_pair_three_hours_apart_is_unrelated() {
        let history = history_of(vec![reading(at(8, 0), 160, 100, Posture::Lying)]);
        let standing = reading(at(11, 0), 135, 95, Posture::Standing);
        assert!(!detect_orthostatic(&standing, &history));
    }

    #[test]
    fn no_lying_reading_anywhere() {
        let history = history_of(vec![
            reading(at(8, 0), 160, 100, Posture::Sitting),
            reading(at(8, 10), 150, 100, Posture::Standing),
        ]);
        let standing = reading(at(8, 30), 120, 80, Posture::Standing);
        assert!(!detect_orthostatic(&standing, &history));
    }

    #[test]
    fn non_standing_candidate_never_flagged() {
        let history = history_of(vec![reading(at(8, 0), 160, 100, Posture::Lying)]);
        for posture in [Posture::Lying, Posture::Sitting, Posture::Unspecified] {
            let candidate = reading(at(8, 30), 120, 70, posture);
            assert!(!detect_orthostatic(&candidate, &history));
        }
    }

    #[test]
    fn diastolic_drop_alone_is_enough() {
        let history = history_of(vec![reading(at(8, 0), 130, 90, Posture::Lying)]);
        let standing = reading(at(8, 5), 125, 80, Posture::Standing);
        assert!(detect_orthostatic(&standing, &history));
    }

    #[test]
    fn small_drop_is_not_flagged() {
        let history = history_of(vec![reading(at(8, 0), 130, 90, Posture::Lying)]);
        let standing = reading(at(8, 5), 111, 81, Posture::Standing);
        assert!(!detect_orthostatic(&standing, &history));
    }

    #[test]
    fn exactly_two_hours_is_related() {
        let history = history_of(vec![reading(at(8, 0), 160, 100, Posture::Lying)]);
        let standing = reading(at(10, 0), 135, 95, Posture::Standing);
        assert!(detect_orthostatic(&standing, &history));
    }

    #[test]
    fn lying_reading_after_standing_still_counts() {
        // The gap is absolute: a lying reading timestamped later still pairs.
        let history = history_of(vec![reading(at(9, 0), 160, 100, Posture::Lying)]);
        let standing = reading(at(8, 0), 135, 95, Posture::Standing);
        assert!(detect_orthostatic(&standing, &history));
    }

    #[test]
    fn search_stops_at_most_recent_lying_entry() {
        // The older lying reading would qualify, but the last appended one is
        // out of the window, so nothing is flagged.
        let history = history_of(vec![
            reading(at(8, 0), 160, 100, Posture::Lying),
            reading(at(1, 0), 160, 100, Posture::Lying),
        ]);
        let standing = reading(at(8, 30), 130, 85, Posture::Standing);
        assert!(!detect_orthostatic(&standing, &history));
    }

    #[test]
    fn uses_insertion_order_not_timestamps() {
        // Appended last but chronologically older: still the one compared.
        let history = history_of(vec![
            reading(at(8, 20), 125, 80, Posture::Lying),
            reading(at(7, 0), 160, 100, Posture::Lying),
        ]);
        let standing = reading(at(8, 30), 130, 85, Posture::Standing);
        assert!(detect_orthostatic(&standing, &history));
    }
}
