//! `GET /generate_pdf` and `GET /generate_pdf/{id}` — PDF download of a
//! patient report, rendered by the external engine.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::pages;
use crate::api::types::ApiContext;
use crate::diagnosis::TextGenerate;
use crate::report::{render, ReportStyle, ReportView};
use crate::store::PatientRecord;

/// `GET /generate_pdf` — the first record's report, for the bare
/// download link with no id. Download name `patient_report.pdf`.
pub async fn first<G: TextGenerate>(
    State(ctx): State<ApiContext<G>>,
) -> Result<Response, ApiError> {
    let record = ctx
        .store
        .get(0)
        .map_err(|_| ApiError::NotFound("No patient records loaded".into()))?;

    export(&ctx, record, "patient_report.pdf".into()).await
}

/// `GET /generate_pdf/{id}` — one record's report, download name
/// `patient_{id}_report.pdf`.
pub async fn by_id<G: TextGenerate>(
    State(ctx): State<ApiContext<G>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let record = ctx
        .store
        .get_by_id(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Patient {id} not found")))?;

    let filename = format!("patient_{}_report.pdf", record.id_key());
    export(&ctx, record, filename).await
}

async fn export<G: TextGenerate>(
    ctx: &ApiContext<G>,
    record: &PatientRecord,
    filename: String,
) -> Result<Response, ApiError> {
    let view = ReportView::from_record(record)?;
    let fragment = render(&view, ReportStyle::Html);
    // The engine needs a complete document, not a bare fragment.
    let document = pages::shell(&format!("Patient {}", view.patient_id), &fragment);

    let bytes = ctx.pdf.render(&document).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
