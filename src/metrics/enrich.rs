use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::classify::classify;
use super::derived::{mean_arterial_pressure, pulse_pressure};
use super::orthostatic::detect_orthostatic;
use crate::models::{EnrichedReading, RawReading, Reading, SeverityLevel, ValidationError};

/// The derived half of an enriched reading. Deterministic for a given
/// reading and history snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub pulse_pressure: i32,
    pub mean_arterial_pressure: u16,
    pub severity_level: SeverityLevel,
    pub orthostatic_flag: bool,
}

impl Assessment {
    pub fn of(reading: &EnrichedReading) -> Self {
        Assessment {
            pulse_pressure: reading.pulse_pressure,
            mean_arterial_pressure: reading.mean_arterial_pressure,
            severity_level: reading.severity_level,
            orthostatic_flag: reading.orthostatic_flag,
        }
    }
}

/// Runs classifier, derived values and postural detection for one reading.
pub fn assess(reading: &Reading, history: &[EnrichedReading]) -> Assessment {
    Assessment {
        pulse_pressure: pulse_pressure(reading.systolic, reading.diastolic),
        mean_arterial_pressure: mean_arterial_pressure(reading.systolic, reading.diastolic),
        severity_level: classify(reading.systolic, reading.diastolic),
        orthostatic_flag: detect_orthostatic(reading, history),
    }
}

/// Validates a raw record and enriches it against `history`.
///
/// The history is only read. Appending the result is the caller's job.
pub fn enrich(
    raw: &RawReading,
    history: &[EnrichedReading],
) -> Result<EnrichedReading, ValidationError> {
    let reading = Reading::parse(raw)?;
    Ok(enrich_reading(reading, history))
}

/// Enriches an already validated reading and gives it a fresh id.
pub fn enrich_reading(reading: Reading, history: &[EnrichedReading]) -> EnrichedReading {
    let assessment = assess(&reading, history);
    let id = Uuid::new_v4().to_string();

    tracing::debug!(
        %id,
        level = %assessment.severity_level,
        orthostatic = assessment.orthostatic_flag,
        "Reading enriched"
    );

    EnrichedReading {
        id,
        reading,
        pulse_pressure: assessment.pulse_pressure,
        mean_arterial_pressure: assessment.mean_arterial_pressure,
        severity_level: assessment.severity_level,
        orthostatic_flag: assessment.orthostatic_flag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Posture;

    fn raw(ts: &str, s: &str, d: &str, posture: &str) -> RawReading {
        RawReading {
            timestamp: ts.into(),
            systolic: Some(s.into()),
            diastolic: Some(d.into()),
            posture: posture.into(),
            ..Default::default()
        }
    }

    #[test]
    fn enrich_fills_every_derived_field() {
        let enriched = enrich(&raw("2026-05-02T09:00", "120", "80", "sitting"), &[]).unwrap();
        assert_eq!(enriched.pulse_pressure, 40);
        assert_eq!(enriched.mean_arterial_pressure, 93);
        assert_eq!(enriched.severity_level, SeverityLevel::Stage1);
        assert!(!enriched.orthostatic_flag);
        assert_eq!(enriched.reading.posture, Posture::Sitting);
        assert!(Uuid::parse_str(&enriched.id).is_ok());
    }

    #[test]
    fn enrich_rejects_malformed_input() {
        let err = enrich(&raw("2026-05-02T09:00", "high", "80", ""), &[]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber { .. }));
    }

    #[test]
    fn enrich_does_not_touch_history() {
        let lying = enrich(&raw("2026-05-02T09:00", "160", "100", "lying"), &[]).unwrap();
        let history = vec![lying.clone()];
        let standing =
            enrich(&raw("2026-05-02T09:30", "135", "95", "standing"), &history).unwrap();
        assert!(standing.orthostatic_flag);
        assert_eq!(history, vec![lying]);
    }

    #[test]
    fn ids_are_unique() {
        let a = enrich(&raw("2026-05-02T09:00", "120", "80", ""), &[]).unwrap();
        let b = enrich(&raw("2026-05-02T09:00", "120", "80", ""), &[]).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn re_enrichment_is_deterministic() {
        let lying = enrich(&raw("2026-05-02T09:00", "160", "100", "lying"), &[]).unwrap();
        let history = vec![lying];
        let first =
            enrich(&raw("2026-05-02T09:20", "138", "88", "standing"), &history).unwrap();

        let again = assess(&first.reading, &history);
        assert_eq!(again, Assessment::of(&first));

        let second = enrich(&first.reading.to_raw(), &history).unwrap();
        assert_eq!(Assessment::of(&second), Assessment::of(&first));
        assert_eq!(second.reading, first.reading);
    }
}
