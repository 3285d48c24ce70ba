//! Record → view-model extraction shared by every output style.

use chrono::NaiveDateTime;

use crate::store::PatientRecord;

/// Exact pattern of the dataset's timestamp column, after the fractional
/// second (if any) has been cut off.
const TIMESTAMP_INPUT: &str = "%Y-%m-%d %H:%M:%S";
/// Display form, e.g. `01 Mar 2024, 10:15 AM`.
const TIMESTAMP_DISPLAY: &str = "%d %b %Y, %I:%M %p";

/// A per-record formatting failure. Recoverable: the listing renders an
/// inline error for the affected row and carries on.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("cannot parse timestamp {value:?}")]
    TimestampParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Every report field already stringified, ready for interpolation.
/// Missing measurements become empty strings, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportView {
    pub patient_id: String,
    pub gender: String,
    pub age: String,
    pub weight_kg: String,
    pub height_m: String,
    pub bmi: String,
    pub heart_rate: String,
    pub respiratory_rate: String,
    pub body_temperature: String,
    pub oxygen_saturation: String,
    pub systolic_bp: String,
    pub diastolic_bp: String,
    pub pulse_pressure: String,
    pub map: String,
    pub hrv: String,
    pub timestamp_display: String,
}

impl ReportView {
    /// Extract all report fields from a record.
    ///
    /// The timestamp is truncated at the first `.` (dropping the
    /// sub-second fraction) and must then match [`TIMESTAMP_INPUT`]
    /// exactly; anything else is a [`FormatError::TimestampParse`].
    pub fn from_record(record: &PatientRecord) -> Result<Self, FormatError> {
        let raw = record
            .timestamp
            .split('.')
            .next()
            .unwrap_or(record.timestamp.as_str());
        let parsed = NaiveDateTime::parse_from_str(raw, TIMESTAMP_INPUT).map_err(|source| {
            FormatError::TimestampParse {
                value: record.timestamp.clone(),
                source,
            }
        })?;

        Ok(Self {
            patient_id: record.patient_id.clone(),
            gender: record.gender.clone().unwrap_or_default(),
            age: opt_int(record.age),
            weight_kg: opt_num(record.weight_kg),
            height_m: opt_num(record.height_m),
            bmi: opt_num(record.bmi),
            heart_rate: opt_num(record.heart_rate),
            respiratory_rate: opt_num(record.respiratory_rate),
            body_temperature: opt_num(record.body_temperature),
            oxygen_saturation: opt_num(record.oxygen_saturation),
            systolic_bp: opt_num(record.systolic_bp),
            diastolic_bp: opt_num(record.diastolic_bp),
            pulse_pressure: opt_num(record.pulse_pressure),
            map: opt_num(record.map),
            hrv: opt_num(record.hrv),
            timestamp_display: parsed.format(TIMESTAMP_DISPLAY).to_string(),
        })
    }
}

fn opt_num(value: Option<f64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

fn opt_int(value: Option<i64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}
