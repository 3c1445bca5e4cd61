use chrono::Timelike;

use super::types::{DayPart, DayPartAverage};
use crate::models::EnrichedReading;

/// Averages systolic and diastolic per day-part, by local hour of the reading.
/// Always returns the four buckets in `DayPart::ALL` order.
pub fn bucket_by_day_part(history: &[EnrichedReading]) -> Vec<DayPartAverage> {
    let mut sums = [(0u64, 0u64, 0usize); 4];

    for entry in history {
        let bucket = &mut sums[DayPart::for_hour(entry.reading.timestamp.hour()).index()];
        bucket.0 += u64::from(entry.reading.systolic);
        bucket.1 += u64::from(entry.reading.diastolic);
        bucket.2 += 1;
    }

    DayPart::ALL
        .iter()
        .map(|&day_part| {
            let (systolic, diastolic, count) = sums[day_part.index()];
            DayPartAverage {
                day_part,
                count,
                avg_systolic: average(systolic, count),
                avg_diastolic: average(diastolic, count),
            }
        })
        .collect()
}

/// Mean rounded to one decimal, half away from zero. Zero for no samples.
fn average(sum: u64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let mean = sum as f64 / count as f64;
    (mean * 10.0).round() / 10.0
}
