//! `GET /patient/{id}` — a single formatted report.

use axum::extract::{Path, State};
use axum::response::Html;

use crate::api::error::ApiError;
use crate::api::pages;
use crate::api::types::ApiContext;
use crate::diagnosis::TextGenerate;
use crate::report::{render, ReportStyle, ReportView};

pub async fn detail<G: TextGenerate>(
    State(ctx): State<ApiContext<G>>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let record = ctx
        .store
        .get_by_id(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Patient {id} not found")))?;

    let view = ReportView::from_record(record)?;
    let fragment = render(&view, ReportStyle::Html);

    Ok(Html(pages::report_page(&view.patient_id, &fragment)))
}
