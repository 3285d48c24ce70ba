//! API error types with HTML error pages and HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::api::pages;
use crate::diagnosis::DiagnosisError;
use crate::export::RenderError;
use crate::report::FormatError;

/// Request-level errors with HTTP status mapping. Every variant surfaces
/// to the requester as a user-visible error page.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("report formatting failed")]
    Format(#[from] FormatError),
    #[error("diagnosis service not configured")]
    DiagnosisUnavailable,
    #[error("diagnosis failed")]
    Diagnosis(#[from] DiagnosisError),
    #[error("PDF export failed")]
    Render(#[from] RenderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail.clone()),
            ApiError::Format(e) => {
                tracing::error!(error = %e, "report formatting failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The report for this record could not be formatted.".to_string(),
                )
            }
            ApiError::DiagnosisUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "The diagnosis service is not configured on this server.".to_string(),
            ),
            ApiError::Diagnosis(e) => {
                tracing::error!(error = %e, "diagnosis pipeline failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "The diagnosis service could not be reached. Please try again later."
                        .to_string(),
                )
            }
            ApiError::Render(e) => {
                tracing::error!(error = %e, "PDF export failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The PDF could not be generated.".to_string(),
                )
            }
        };

        let body = pages::error_page(status, &message);
        (status, Html(body)).into_response()
    }
}
