//! AI-assisted diagnosis pipeline.
//!
//! Two strictly sequential calls to the external text-generation service:
//! the first turns the French plain-text report into a diagnosis, the
//! second turns report + diagnosis into tiered recommendations. The final
//! report is the three text blocks joined by blank lines.
//!
//! Failure semantics: any transport or API failure in either call aborts
//! the whole request. There is no retry, no fallback text and no
//! partially assembled report. An empty stream is valid empty text.

mod client;
mod prompt;

pub use client::{ChatClient, MockGenerator, TextGenerate};

use crate::report::{render, ReportStyle, ReportView};

/// Failure talking to the text-generation service. Unrecoverable for the
/// request in progress.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosisError {
    #[error("cannot reach text-generation service at {0}")]
    Connection(String),
    #[error("text-generation request timed out after {0}s")]
    Timeout(u64),
    #[error("text-generation service returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("malformed response stream: {0}")]
    Stream(String),
}

/// Orchestrates the diagnose → recommend chain over any [`TextGenerate`].
pub struct DiagnosisPipeline<'a, G: TextGenerate> {
    generator: &'a G,
}

impl<'a, G: TextGenerate> DiagnosisPipeline<'a, G> {
    pub fn new(generator: &'a G) -> Self {
        Self { generator }
    }

    /// Produce the combined report for one patient.
    ///
    /// The recommendation call only starts once the diagnosis call has
    /// fully materialized; its prompt embeds the diagnosis text.
    pub async fn run(&self, view: &ReportView) -> Result<String, DiagnosisError> {
        let report = render(view, ReportStyle::TextFr);

        tracing::debug!(patient_id = %view.patient_id, "requesting diagnosis");
        let diagnosis = self
            .generator
            .generate(&prompt::build_diagnosis_prompt(&report))
            .await?;

        tracing::debug!(patient_id = %view.patient_id, "requesting recommendations");
        let recommendations = self
            .generator
            .generate(&prompt::build_recommendation_prompt(&report, &diagnosis))
            .await?;

        Ok(format!("{report}\n\n{diagnosis}\n\n{recommendations}"))
    }
}
