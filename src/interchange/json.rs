use super::{ImportedRow, InterchangeError};
use crate::models::{EnrichedReading, RawReading};

/// Pretty-printed array of enriched readings, in insertion order.
pub fn export_json(history: &[EnrichedReading]) -> Result<String, InterchangeError> {
    Ok(serde_json::to_string_pretty(history)?)
}

/// Parse a JSON array of readings. Enriched exports are accepted too: their
/// derived fields and ids are ignored and re-derived on import.
pub fn parse_json(text: &str) -> Result<Vec<ImportedRow>, InterchangeError> {
    let readings: Vec<RawReading> = serde_json::from_str(text)?;
    Ok(readings
        .into_iter()
        .enumerate()
        .map(|(index, reading)| ImportedRow {
            line: index as u64 + 1,
            reading,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::enrich;
    use crate::models::{RawValue, Reading};

    #[test]
    fn export_then_parse_keeps_readings() {
        let raw = RawReading {
            timestamp: "2026-08-01T21:10".into(),
            systolic: Some("145".into()),
            diastolic: Some("92".into()),
            heart_rate: Some("77".into()),
            posture: "sitting".into(),
            symptoms: vec!["palpitations".into()],
            note: "after dinner".into(),
            ..Default::default()
        };
        let history = vec![enrich(&raw, &[]).unwrap()];

        let json = export_json(&history).unwrap();
        assert!(json.contains("\"severityLevel\": \"stage2\""));
        assert!(json.contains("\"meanArterialPressure\": 110"));

        let rows = parse_json(&json).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line, 1);
        assert_eq!(Reading::parse(&rows[0].reading).unwrap(), history[0].reading);
    }

    #[test]
    fn parse_mixed_number_and_text_fields() {
        let text = r#"[
            {"timestamp": "2026-08-02T06:30", "systolic": 118, "diastolic": "76", "heartRate": null},
            {"timestamp": "2026-08-02T06:35", "systolic": "121", "diastolic": 79, "posture": "standing"}
        ]"#;
        let rows = parse_json(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].reading.systolic, Some(RawValue::Number(118.0)));
        assert_eq!(rows[0].reading.heart_rate, None);
        assert_eq!(rows[1].reading.posture, "standing");
        assert!(rows[1].reading.symptoms.is_empty());
    }

    #[test]
    fn parse_rejects_non_array() {
        assert!(matches!(
            parse_json("{\"timestamp\": \"x\"}"),
            Err(InterchangeError::Json(_))
        ));
    }

    #[test]
    fn empty_history_exports_empty_array() {
        assert_eq!(export_json(&[]).unwrap(), "[]");
    }
}
