//! `GET /` — the paginated patient listing.

use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

use crate::api::pages::{self, ListingRow};
use crate::api::types::ApiContext;
use crate::diagnosis::TextGenerate;
use crate::pagination::{paginate, parse_page, PAGE_SIZE};
use crate::report::ReportView;
use crate::store::PatientRecord;

/// `page` is taken as a raw string: absent or non-numeric means page 1,
/// it never rejects the request.
#[derive(Deserialize)]
pub struct ListingQuery {
    pub page: Option<String>,
}

/// `GET /?page=N` — one page of the dataset.
///
/// A record that fails to format becomes an inline error row; the
/// listing itself always renders.
pub async fn index<G: TextGenerate>(
    State(ctx): State<ApiContext<G>>,
    Query(query): Query<ListingQuery>,
) -> Html<String> {
    let page = paginate(
        ctx.store.len(),
        parse_page(query.page.as_deref()),
        PAGE_SIZE,
    );

    let rows: Vec<ListingRow> = ctx
        .store
        .slice(page.offset, PAGE_SIZE)
        .iter()
        .map(listing_row)
        .collect();

    Html(pages::listing_page(&rows, page, ctx.store.len()))
}

fn listing_row(record: &PatientRecord) -> ListingRow {
    match ReportView::from_record(record) {
        Ok(view) => ListingRow {
            id: view.patient_id,
            gender: view.gender,
            age: view.age,
            heart_rate: view.heart_rate,
            timestamp: view.timestamp_display,
            error: None,
        },
        Err(e) => ListingRow {
            id: record.patient_id.clone(),
            gender: String::new(),
            age: String::new(),
            heart_rate: String::new(),
            timestamp: String::new(),
            error: Some(e.to_string()),
        },
    }
}
