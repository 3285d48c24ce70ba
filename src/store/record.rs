//! One row of the vital-signs dataset.
//!
//! Field names mirror the dataset's CSV headers exactly. The id column is
//! kept as a string so lookups are string-keyed no matter how the source
//! file spells the value. Every measurement is optional; an empty cell
//! deserializes to `None` and renders as a placeholder, never an error.

use serde::{Deserialize, Serialize};

/// A patient's vital-sign reading, immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "Patient ID")]
    pub patient_id: String,
    #[serde(rename = "Heart Rate")]
    pub heart_rate: Option<f64>,
    #[serde(rename = "Respiratory Rate")]
    pub respiratory_rate: Option<f64>,
    /// `YYYY-MM-DD HH:MM:SS` with an optional fractional-second suffix.
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Body Temperature")]
    pub body_temperature: Option<f64>,
    #[serde(rename = "Oxygen Saturation")]
    pub oxygen_saturation: Option<f64>,
    #[serde(rename = "Systolic Blood Pressure")]
    pub systolic_bp: Option<f64>,
    #[serde(rename = "Diastolic Blood Pressure")]
    pub diastolic_bp: Option<f64>,
    #[serde(rename = "Age")]
    pub age: Option<i64>,
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
    #[serde(rename = "Weight (kg)")]
    pub weight_kg: Option<f64>,
    #[serde(rename = "Height (m)")]
    pub height_m: Option<f64>,
    /// Heart-rate variability, precomputed upstream.
    #[serde(rename = "Derived_HRV")]
    pub hrv: Option<f64>,
    #[serde(rename = "Derived_Pulse_Pressure")]
    pub pulse_pressure: Option<f64>,
    #[serde(rename = "Derived_BMI")]
    pub bmi: Option<f64>,
    /// Mean arterial pressure, precomputed upstream.
    #[serde(rename = "Derived_MAP")]
    pub map: Option<f64>,
}

impl PatientRecord {
    /// The string key used for lookups: the id cell with surrounding
    /// whitespace removed.
    pub fn id_key(&self) -> &str {
        self.patient_id.trim()
    }
}
