//! CSV dialect: `ts,sbp,dbp,hr,posture,symptoms,meds,note`.
//!
//! Symptoms are joined with `;`. Each medication is `name;dose;at` and
//! medications are joined with `|`. Absent heart rate is an empty cell and an
//! unspecified posture is written as an empty cell.

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};

use super::{ImportedRow, InterchangeError};
use crate::models::{format_timestamp, EnrichedReading, MedicationDose, Posture, RawReading};

pub const HEADER: [&str; 8] = ["ts", "sbp", "dbp", "hr", "posture", "symptoms", "meds", "note"];

const SYMPTOM_SEPARATOR: &str = ";";
const MEDICATION_SEPARATOR: &str = "|";
const MEDICATION_FIELD_SEPARATOR: &str = ";";

/// Serialise the history in insertion order. Derived fields are not written;
/// they are re-derived on import.
pub fn export_csv(history: &[EnrichedReading]) -> Result<String, InterchangeError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for entry in history {
        let reading = &entry.reading;
        let posture = match reading.posture {
            Posture::Unspecified => "",
            other => other.as_str(),
        };
        writer.write_record([
            format_timestamp(&reading.timestamp),
            reading.systolic.to_string(),
            reading.diastolic.to_string(),
            reading.heart_rate.map(|hr| hr.to_string()).unwrap_or_default(),
            posture.to_string(),
            join_symptoms(&reading.symptoms),
            join_medications(&reading.medications),
            reading.note.clone(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| InterchangeError::Encoding(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| InterchangeError::Encoding(e.to_string()))
}

/// Parse CSV text into raw readings. Columns are matched by header name, so
/// their order does not matter; `ts`, `sbp` and `dbp` are required. Cells are
/// kept verbatim apart from the numeric and posture columns, which are trimmed.
pub fn parse_csv(text: &str) -> Result<Vec<ImportedRow>, InterchangeError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let line = record
            .position()
            .map(|p| physical_line(text, p.byte()))
            .unwrap_or_default();
        rows.push(ImportedRow {
            line,
            reading: columns.to_raw(&record),
        });
    }

    Ok(rows)
}

/// 1-based line on which the record starting at `byte` begins. The reader
/// reports the offset before any line terminators it skips, so those are
/// stepped over first; counting `\n` numbers CRLF files and blank lines the
/// way an editor does.
fn physical_line(text: &str, byte: u64) -> u64 {
    let bytes = text.as_bytes();
    let mut start = usize::try_from(byte).map_or(bytes.len(), |b| b.min(bytes.len()));
    while start < bytes.len() && matches!(bytes[start], b'\r' | b'\n') {
        start += 1;
    }
    let newlines = bytes[..start].iter().filter(|&&b| b == b'\n').count();
    newlines as u64 + 1
}

struct ColumnMap {
    ts: usize,
    sbp: usize,
    dbp: usize,
    hr: Option<usize>,
    posture: Option<usize>,
    symptoms: Option<usize>,
    meds: Option<usize>,
    note: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, InterchangeError> {
        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        Ok(ColumnMap {
            ts: find("ts").ok_or(InterchangeError::MissingColumn("ts"))?,
            sbp: find("sbp").ok_or(InterchangeError::MissingColumn("sbp"))?,
            dbp: find("dbp").ok_or(InterchangeError::MissingColumn("dbp"))?,
            hr: find("hr"),
            posture: find("posture"),
            symptoms: find("symptoms"),
            meds: find("meds"),
            note: find("note"),
        })
    }

    fn to_raw(&self, record: &StringRecord) -> RawReading {
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        let optional = |idx: Option<usize>| idx.map(cell).unwrap_or("");

        let hr = optional(self.hr).trim();
        RawReading {
            timestamp: cell(self.ts).trim().to_string(),
            systolic: Some(cell(self.sbp).trim().into()),
            diastolic: Some(cell(self.dbp).trim().into()),
            heart_rate: (!hr.is_empty()).then(|| hr.into()),
            posture: optional(self.posture).trim().to_string(),
            symptoms: split_symptoms(optional(self.symptoms)),
            medications: split_medications(optional(self.meds)),
            note: optional(self.note).to_string(),
        }
    }
}

fn join_symptoms(symptoms: &[String]) -> String {
    symptoms
        .iter()
        .map(|s| s.replace(SYMPTOM_SEPARATOR, " "))
        .collect::<Vec<_>>()
        .join(SYMPTOM_SEPARATOR)
}

fn split_symptoms(cell: &str) -> Vec<String> {
    cell.split(SYMPTOM_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_medications(medications: &[MedicationDose]) -> String {
    let clean = |s: &str| {
        s.replace(MEDICATION_SEPARATOR, " ")
            .replace(MEDICATION_FIELD_SEPARATOR, " ")
    };
    medications
        .iter()
        .map(|m| {
            format!(
                "{}{sep}{}{sep}{}",
                clean(&m.name),
                clean(&m.dose),
                clean(&m.administered_at),
                sep = MEDICATION_FIELD_SEPARATOR
            )
        })
        .collect::<Vec<_>>()
        .join(MEDICATION_SEPARATOR)
}

fn split_medications(cell: &str) -> Vec<MedicationDose> {
    cell.split(MEDICATION_SEPARATOR)
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            let mut fields = part.split(MEDICATION_FIELD_SEPARATOR).map(str::trim);
            MedicationDose {
                name: fields.next().unwrap_or_default().to_string(),
                dose: fields.next().unwrap_or_default().to_string(),
                administered_at: fields.next().unwrap_or_default().to_string(),
            }
        })
        .collect()
}
