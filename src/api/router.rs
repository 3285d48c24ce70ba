//! Route table for the web application.

use axum::routing::get;
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::diagnosis::TextGenerate;

/// Build the application router.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn app_router<G>(ctx: ApiContext<G>) -> Router
where
    G: TextGenerate + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(endpoints::listing::index::<G>))
        .route("/patient/:id", get(endpoints::patient::detail::<G>))
        .route(
            "/patient/:id/diagnosis",
            get(endpoints::diagnosis::generate::<G>),
        )
        .route("/generate_pdf", get(endpoints::pdf::first::<G>))
        .route("/generate_pdf/:id", get(endpoints::pdf::by_id::<G>))
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::diagnosis::MockGenerator;
    use crate::export::PdfEngine;
    use crate::store::{PatientRecord, RecordStore};

    fn record(id: usize) -> PatientRecord {
        PatientRecord {
            patient_id: id.to_string(),
            heart_rate: Some(72.0),
            respiratory_rate: Some(16.0),
            timestamp: "2024-03-01 10:15:30.500".into(),
            body_temperature: Some(36.6),
            oxygen_saturation: Some(98.0),
            systolic_bp: Some(120.0),
            diastolic_bp: Some(80.0),
            age: Some(54),
            gender: Some("Male".into()),
            weight_kg: Some(81.2),
            height_m: Some(1.78),
            hrv: Some(0.12),
            pulse_pressure: Some(40.0),
            bmi: Some(25.6),
            map: Some(93.3),
        }
    }

    fn test_app_with(
        rows: Vec<PatientRecord>,
        generator: Option<MockGenerator>,
    ) -> Router {
        let ctx = ApiContext::new(
            Arc::new(RecordStore::from_rows(rows)),
            // `cat - -` echoes the HTML back, standing in for wkhtmltopdf.
            PdfEngine::new("cat".into()),
            generator.map(Arc::new),
        );
        app_router(ctx)
    }

    fn test_app(rows: usize) -> Router {
        test_app_with((1..=rows).map(record).collect(), None)
    }

    async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    // ── Listing ─────────────────────────────────────────

    #[tokio::test]
    async fn listing_first_page_has_twenty_rows() {
        let (status, body) = get_page(test_app(45), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("\">report</a>").count(), 20);
        assert!(body.contains("Page 1 of 3"));
    }

    #[tokio::test]
    async fn listing_last_page_has_the_remainder() {
        let (status, body) = get_page(test_app(45), "/?page=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("\">report</a>").count(), 5);
        assert!(body.contains("/patient/41"));
        assert!(body.contains("/patient/45"));
        assert!(body.contains("Page 3 of 3"));
    }

    #[tokio::test]
    async fn listing_beyond_last_page_is_empty_not_an_error() {
        let (status, body) = get_page(test_app(45), "/?page=9").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("\">report</a>").count(), 0);
    }

    #[tokio::test]
    async fn listing_non_numeric_page_defaults_to_one() {
        let (status, body) = get_page(test_app(45), "/?page=abc").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Page 1 of 3"));
    }

    #[tokio::test]
    async fn listing_page_zero_clamps_to_one() {
        let (status, body) = get_page(test_app(45), "/?page=0").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Page 1 of 3"));
        assert_eq!(body.matches("\">report</a>").count(), 20);
    }

    #[tokio::test]
    async fn listing_survives_a_malformed_record() {
        let mut rows: Vec<PatientRecord> = (1..=2).map(record).collect();
        rows[1].timestamp = "not-a-date".into();

        let (status, body) = get_page(test_app_with(rows, None), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("class=\"error\""));
        assert!(body.contains("not-a-date"));
        // The healthy record still shows its formatted timestamp.
        assert!(body.contains("01 Mar 2024, 10:15 AM"));
    }

    #[tokio::test]
    async fn empty_dataset_renders_empty_state() {
        let (status, body) = get_page(test_app(0), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No patient records loaded."));
    }

    // ── Patient detail ──────────────────────────────────

    #[tokio::test]
    async fn patient_detail_renders_report() {
        let (status, body) = get_page(test_app(10), "/patient/7").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h2>Patient Report</h2>"));
        assert!(body.contains("<strong>Patient ID:</strong> 7 <br>"));
        assert!(body.contains("01 Mar 2024, 10:15 AM"));
    }

    #[tokio::test]
    async fn unknown_patient_is_a_not_found_page() {
        let app = test_app(10);
        let (status, body) = get_page(app.clone(), "/patient/999999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Patient 999999 not found"));

        // The listing is unaffected by the failed lookup.
        let (status, _) = get_page(app, "/").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_timestamp_fails_only_the_detail_page() {
        let mut rows = vec![record(1)];
        rows[0].timestamp = "not-a-date".into();
        let app = test_app_with(rows, None);

        let (status, _) = get_page(app.clone(), "/patient/1").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = get_page(app, "/").await;
        assert_eq!(status, StatusCode::OK);
    }

    // ── Diagnosis ───────────────────────────────────────

    #[tokio::test]
    async fn diagnosis_returns_combined_plain_text() {
        let generator = MockGenerator::with_responses(vec![
            Ok("Diagnostic : tachycardie"),
            Ok("Court terme : repos"),
        ]);
        let app = test_app_with((1..=10).map(record).collect(), Some(generator));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/patient/7/diagnosis")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/plain"));

        let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.starts_with("Rapport du patient :"));
        assert!(body.contains("Diagnostic : tachycardie"));
        assert!(body.ends_with("Court terme : repos"));
    }

    #[tokio::test]
    async fn diagnosis_without_generator_is_503() {
        let (status, body) = get_page(test_app(10), "/patient/7/diagnosis").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("not configured"));
    }

    #[tokio::test]
    async fn diagnosis_failure_on_second_call_is_502_with_no_partial_report() {
        let generator = MockGenerator::with_responses(vec![
            Ok("Diagnostic : tachycardie"),
            Err("upstream exploded"),
        ]);
        let app = test_app_with((1..=10).map(record).collect(), Some(generator));

        let (status, body) = get_page(app, "/patient/7/diagnosis").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!body.contains("Rapport du patient"));
        assert!(!body.contains("Diagnostic : tachycardie"));
    }

    #[tokio::test]
    async fn diagnosis_for_unknown_patient_is_404() {
        let generator = MockGenerator::with_responses(vec![]);
        let app = test_app_with((1..=10).map(record).collect(), Some(generator));
        let (status, _) = get_page(app, "/patient/999999/diagnosis").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // ── PDF export ──────────────────────────────────────

    #[tokio::test]
    async fn generate_pdf_exports_the_first_record() {
        let app = test_app(10);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/generate_pdf")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"patient_report.pdf\""
        );

        // The stand-in engine echoes the document it was given.
        let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("<h2>Patient Report</h2>"));
        assert!(body.contains("<strong>Patient ID:</strong> 1 <br>"));
    }

    #[tokio::test]
    async fn generate_pdf_by_id_names_the_file_after_the_patient() {
        let app = test_app(10);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/generate_pdf/7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"patient_7_report.pdf\""
        );
    }

    #[tokio::test]
    async fn generate_pdf_unknown_id_is_404() {
        let (status, _) = get_page(test_app(10), "/generate_pdf/999999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn generate_pdf_on_empty_dataset_is_404() {
        let (status, _) = get_page(test_app(0), "/generate_pdf").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (status, _) = get_page(test_app(1), "/nonexistent").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
