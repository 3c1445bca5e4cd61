use chrono::{Duration, NaiveDateTime};

use super::types::TimeWindow;
use crate::models::EnrichedReading;

/// Readings inside `window`, oldest first.
///
/// `Days(n)` keeps `now - n days <= timestamp <= now`. A lower bound beyond
/// the calendar range drops that bound. The result is always sorted by
/// timestamp whatever the insertion order; ties keep insertion order.
pub fn filter_by_window(
    history: &[EnrichedReading],
    window: TimeWindow,
    now: NaiveDateTime,
) -> Vec<&EnrichedReading> {
    let mut selected: Vec<&EnrichedReading> = match window {
        TimeWindow::All => history.iter().collect(),
        TimeWindow::Days(days) => {
            let threshold = now.checked_sub_signed(Duration::days(i64::from(days)));
            history
                .iter()
                .filter(|r| {
                    let ts = r.reading.timestamp;
                    ts <= now && threshold.map_or(true, |t| ts >= t)
                })
                .collect()
        }
    };

    selected.sort_by_key(|r| r.reading.timestamp);
    selected
}

/// The last appended reading, which is not necessarily the newest timestamp.
pub fn latest(history: &[EnrichedReading]) -> Option<&EnrichedReading> {
    history.last()
}
