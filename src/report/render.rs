//! Pure per-style report renderers.
//!
//! Layouts are fixed; the view's values are interpolated as-is, with no
//! unit conversion and no rounding. The HTML style escapes values before
//! interpolation; the text styles stay verbatim because they feed the
//! plain-text display and the diagnosis prompt.

use super::view::ReportView;

/// Output layout for a formatted report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStyle {
    /// HTML fragment for the web pages and the PDF export.
    Html,
    /// Plain-text block.
    Text,
    /// French plain-text block, used as the diagnosis prompt body.
    TextFr,
}

/// Render one report in the requested style.
pub fn render(view: &ReportView, style: ReportStyle) -> String {
    match style {
        ReportStyle::Html => render_html(view),
        ReportStyle::Text => render_text(view),
        ReportStyle::TextFr => render_text_fr(view),
    }
}

/// Escape a value for interpolation into HTML text content.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_html(view: &ReportView) -> String {
    let e = escape_html;
    format!(
        "<h2>Patient Report</h2>\n\
         <hr>\n\
         <strong>Patient ID:</strong> {id} <br>\n\
         <strong>Gender:</strong> {gender} <br>\n\
         <strong>Age:</strong> {age} years <br>\n\
         <strong>Weight:</strong> {weight} kg <br>\n\
         <strong>Height:</strong> {height} m <br>\n\
         <strong>BMI:</strong> {bmi} <br><br>\n\
         <h3>Vital Signs</h3>\n\
         <ul>\n\
         <li><strong>Heart Rate:</strong> {heart_rate} bpm</li>\n\
         <li><strong>Respiratory Rate:</strong> {respiratory_rate} breaths/min</li>\n\
         <li><strong>Body Temperature:</strong> {body_temperature} °C</li>\n\
         <li><strong>Oxygen Saturation:</strong> {oxygen_saturation} %</li>\n\
         <li><strong>Systolic BP:</strong> {systolic_bp} mmHg</li>\n\
         <li><strong>Diastolic BP:</strong> {diastolic_bp} mmHg</li>\n\
         <li><strong>Pulse Pressure:</strong> {pulse_pressure} mmHg</li>\n\
         <li><strong>MAP:</strong> {map} mmHg</li>\n\
         <li><strong>HRV:</strong> {hrv} ms</li>\n\
         </ul>\n\
         <strong>Report Timestamp:</strong> {timestamp} <br>\n\
         <hr>\n",
        id = e(&view.patient_id),
        gender = e(&view.gender),
        age = e(&view.age),
        weight = e(&view.weight_kg),
        height = e(&view.height_m),
        bmi = e(&view.bmi),
        heart_rate = e(&view.heart_rate),
        respiratory_rate = e(&view.respiratory_rate),
        body_temperature = e(&view.body_temperature),
        oxygen_saturation = e(&view.oxygen_saturation),
        systolic_bp = e(&view.systolic_bp),
        diastolic_bp = e(&view.diastolic_bp),
        pulse_pressure = e(&view.pulse_pressure),
        map = e(&view.map),
        hrv = e(&view.hrv),
        timestamp = e(&view.timestamp_display),
    )
}

fn render_text(view: &ReportView) -> String {
    format!(
        "Patient Report:\n\
         ----------------\n\
         Patient ID: {id}\n\
         Gender: {gender}\n\
         Age: {age} years\n\
         Weight: {weight} kg\n\
         Height: {height} m\n\
         BMI (Body Mass Index): {bmi}\n\
         \n\
         Vital Signs:\n\
         - Heart Rate: {heart_rate} bpm\n\
         - Respiratory Rate: {respiratory_rate} breaths/min\n\
         - Body Temperature: {body_temperature} °C\n\
         - Oxygen Saturation: {oxygen_saturation} %\n\
         - Systolic Blood Pressure: {systolic_bp} mmHg\n\
         - Diastolic Blood Pressure: {diastolic_bp} mmHg\n\
         - Pulse Pressure: {pulse_pressure} mmHg\n\
         - Mean Arterial Pressure (MAP): {map} mmHg\n\
         - Heart Rate Variability (HRV): {hrv} ms\n\
         \n\
         Report Timestamp: {timestamp}\n\
         ----------------",
        id = view.patient_id,
        gender = view.gender,
        age = view.age,
        weight = view.weight_kg,
        height = view.height_m,
        bmi = view.bmi,
        heart_rate = view.heart_rate,
        respiratory_rate = view.respiratory_rate,
        body_temperature = view.body_temperature,
        oxygen_saturation = view.oxygen_saturation,
        systolic_bp = view.systolic_bp,
        diastolic_bp = view.diastolic_bp,
        pulse_pressure = view.pulse_pressure,
        map = view.map,
        hrv = view.hrv,
        timestamp = view.timestamp_display,
    )
}

fn render_text_fr(view: &ReportView) -> String {
    format!(
        "Rapport du patient :\n\
         ----------------\n\
         ID du patient : {id}\n\
         Sexe : {gender}\n\
         Âge : {age} ans\n\
         Poids : {weight} kg\n\
         Taille : {height} m\n\
         IMC (Indice de Masse Corporelle) : {bmi}\n\
         \n\
         Signes vitaux :\n\
         - Fréquence cardiaque : {heart_rate} bpm\n\
         - Fréquence respiratoire : {respiratory_rate} respirations/min\n\
         - Température corporelle : {body_temperature} °C\n\
         - Saturation en oxygène : {oxygen_saturation} %\n\
         - Pression artérielle systolique : {systolic_bp} mmHg\n\
         - Pression artérielle diastolique : {diastolic_bp} mmHg\n\
         - Pression pulsée : {pulse_pressure} mmHg\n\
         - Pression artérielle moyenne (PAM) : {map} mmHg\n\
         - Variabilité de la fréquence cardiaque (VFC) : {hrv} ms\n\
         \n\
         Horodatage du rapport : {timestamp}\n\
         ----------------",
        id = view.patient_id,
        gender = view.gender,
        age = view.age,
        weight = view.weight_kg,
        height = view.height_m,
        bmi = view.bmi,
        heart_rate = view.heart_rate,
        respiratory_rate = view.respiratory_rate,
        body_temperature = view.body_temperature,
        oxygen_saturation = view.oxygen_saturation,
        systolic_bp = view.systolic_bp,
        diastolic_bp = view.diastolic_bp,
        pulse_pressure = view.pulse_pressure,
        map = view.map,
        hrv = view.hrv,
        timestamp = view.timestamp_display,
    )
}
