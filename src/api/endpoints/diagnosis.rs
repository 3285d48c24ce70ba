//! `GET /patient/{id}/diagnosis` — the AI-assisted combined report.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::diagnosis::{DiagnosisPipeline, TextGenerate};
use crate::report::ReportView;

/// Runs the diagnose → recommend chain and answers with the combined
/// plain-text report. 503 when no generator is configured; any service
/// failure surfaces as 502 with no partial report.
pub async fn generate<G: TextGenerate>(
    State(ctx): State<ApiContext<G>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let generator = ctx
        .generator
        .as_ref()
        .ok_or(ApiError::DiagnosisUnavailable)?;

    let record = ctx
        .store
        .get_by_id(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Patient {id} not found")))?;

    let view = ReportView::from_record(record)?;
    let combined = DiagnosisPipeline::new(generator.as_ref()).run(&view).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        combined,
    ))
}
