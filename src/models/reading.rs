//! Reading shapes: the raw boundary record, the validated reading and the
//! enriched record kept in history.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::enums::{Posture, SeverityLevel};
use super::ValidationError;

/// Accepted naive timestamp layouts, tried in order after RFC 3339.
/// `%.f` also matches an absent fractional part.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Offset-bearing layouts that RFC 3339 does not cover (no seconds).
const OFFSET_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

/// UTC layout with a `Z` designator and no seconds.
const UTC_MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// Date-only input, read as local midnight.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A numeric field as it arrives from a form, a CSV cell or a JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{n}"),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<u16> for RawValue {
    fn from(value: u16) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// A medication taken around the time of the reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicationDose {
    pub name: String,
    pub dose: String,
    /// As entered by the patient; may be empty.
    pub administered_at: String,
}

/// Unvalidated input record (entry form, CSV row, JSON import).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawReading {
    pub timestamp: String,
    pub systolic: Option<RawValue>,
    pub diastolic: Option<RawValue>,
    pub heart_rate: Option<RawValue>,
    pub posture: String,
    pub symptoms: Vec<String>,
    pub medications: Vec<MedicationDose>,
    pub note: String,
}

/// A validated reading. Pressures are mmHg, heart rate is bpm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub timestamp: NaiveDateTime,
    pub systolic: u16,
    pub diastolic: u16,
    pub heart_rate: Option<u16>,
    pub posture: Posture,
    pub symptoms: Vec<String>,
    pub medications: Vec<MedicationDose>,
    pub note: String,
}

impl Reading {
    /// Validates and normalizes a raw record. Fails on the first bad field.
    pub fn parse(raw: &RawReading) -> Result<Self, ValidationError> {
        let timestamp = parse_timestamp(&raw.timestamp)?;
        let systolic = parse_measure("systolic", raw.systolic.as_ref())?
            .ok_or(ValidationError::MissingField("systolic"))?;
        let diastolic = parse_measure("diastolic", raw.diastolic.as_ref())?
            .ok_or(ValidationError::MissingField("diastolic"))?;
        let heart_rate = parse_measure("heartRate", raw.heart_rate.as_ref())?;

        let posture = match raw.posture.trim() {
            "" => Posture::Unspecified,
            other => other.parse()?,
        };

        let symptoms = raw
            .symptoms
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let medications = raw
            .medications
            .iter()
            .filter(|m| !m.name.trim().is_empty())
            .map(|m| MedicationDose {
                name: m.name.trim().to_string(),
                dose: m.dose.trim().to_string(),
                administered_at: m.administered_at.trim().to_string(),
            })
            .collect();

        Ok(Reading {
            timestamp,
            systolic,
            diastolic,
            heart_rate,
            posture,
            symptoms,
            medications,
            note: raw.note.clone(),
        })
    }

    /// The boundary form of this reading, as an importer would produce it.
    pub fn to_raw(&self) -> RawReading {
        RawReading {
            timestamp: format_timestamp(&self.timestamp),
            systolic: Some(self.systolic.into()),
            diastolic: Some(self.diastolic.into()),
            heart_rate: self.heart_rate.map(RawValue::from),
            posture: self.posture.as_str().to_string(),
            symptoms: self.symptoms.clone(),
            medications: self.medications.clone(),
            note: self.note.clone(),
        }
    }
}

/// A reading plus the values derived once, at insertion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedReading {
    pub id: String,
    #[serde(flatten)]
    pub reading: Reading,
    pub pulse_pressure: i32,
    pub mean_arterial_pressure: u16,
    pub severity_level: SeverityLevel,
    pub orthostatic_flag: bool,
}

/// Parses an instant into local wall-clock time. Offsets are converted to the
/// local zone; naive forms are taken as already local.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("timestamp"));
    }

    let with_offset = DateTime::parse_from_rfc3339(trimmed).ok().or_else(|| {
        OFFSET_TIMESTAMP_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(trimmed, format).ok())
    });
    if let Some(dt) = with_offset {
        return Ok(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(utc) = NaiveDateTime::parse_from_str(trimmed, UTC_MINUTE_FORMAT) {
        return Ok(utc.and_utc().with_timezone(&Local).naive_local());
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| ValidationError::InvalidTimestamp(trimmed.to_string()))
}

/// Canonical text form used by the exporters. Fractional seconds are written
/// only when present.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Parses an optional positive integer measurement. Blank text is absent.
fn parse_measure(
    field: &'static str,
    value: Option<&RawValue>,
) -> Result<Option<u16>, ValidationError> {
    let number = match value {
        None => return Ok(None),
        Some(RawValue::Number(n)) => *n,
        Some(RawValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<f64>().map_err(|_| ValidationError::InvalidNumber {
                field,
                value: text.to_string(),
            })?
        }
    };

    if !number.is_finite() || number.fract() != 0.0 {
        return Err(ValidationError::InvalidNumber {
            field,
            value: number.to_string(),
        });
    }
    if number <= 0.0 || number > f64::from(u16::MAX) {
        return Err(ValidationError::OutOfRange {
            field,
            value: number.to_string(),
        });
    }

    Ok(Some(number as u16))
}
