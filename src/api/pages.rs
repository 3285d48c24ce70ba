//! Minimal server-rendered page layout.
//!
//! The report fragment itself comes from [`crate::report`]; this module
//! only wraps fragments in a page shell and lays out the listing table.

use axum::http::StatusCode;

use crate::pagination::Page;
use crate::report::escape_html;

/// One row of the listing table, already stringified. `error` is set when
/// the record could not be formatted; the row then shows the message
/// instead of failing the whole listing.
#[derive(Debug, Clone)]
pub struct ListingRow {
    pub id: String,
    pub gender: String,
    pub age: String,
    pub heart_rate: String,
    pub timestamp: String,
    pub error: Option<String>,
}

/// Wrap a body fragment in the page shell.
pub fn shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2rem auto; max-width: 48rem; }}\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         th, td {{ border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }}\n\
         .pager {{ margin-top: 1rem; }}\n\
         .error {{ color: #a00; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape_html(title),
    )
}

/// The paginated patient listing.
pub fn listing_page(rows: &[ListingRow], page: Page, total: usize) -> String {
    let mut body = String::new();
    body.push_str("<h1>Patients</h1>\n");

    if total == 0 {
        body.push_str("<p>No patient records loaded.</p>\n");
        return shell("Patients", &body);
    }

    body.push_str(
        "<table>\n<tr><th>Patient ID</th><th>Gender</th><th>Age</th>\
         <th>Heart Rate</th><th>Timestamp</th><th></th></tr>\n",
    );
    for row in rows {
        let id = escape_html(&row.id);
        match &row.error {
            Some(message) => {
                body.push_str(&format!(
                    "<tr><td>{id}</td>\
                     <td colspan=\"4\" class=\"error\">{}</td>\
                     <td><a href=\"/patient/{id}\">report</a></td></tr>\n",
                    escape_html(message),
                ));
            }
            None => {
                body.push_str(&format!(
                    "<tr><td>{id}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                     <td><a href=\"/patient/{id}\">report</a> \
                     <a href=\"/generate_pdf/{id}\">pdf</a></td></tr>\n",
                    escape_html(&row.gender),
                    escape_html(&row.age),
                    escape_html(&row.heart_rate),
                    escape_html(&row.timestamp),
                ));
            }
        }
    }
    body.push_str("</table>\n");

    body.push_str("<p class=\"pager\">");
    if page.number > 1 {
        body.push_str(&format!(
            "<a href=\"/?page={}\">&laquo; previous</a> ",
            page.number - 1
        ));
    }
    body.push_str(&format!(
        "Page {} of {}",
        page.number.min(page.total_pages.max(1)),
        page.total_pages,
    ));
    if page.number < page.total_pages {
        body.push_str(&format!(
            " <a href=\"/?page={}\">next &raquo;</a>",
            page.number + 1
        ));
    }
    body.push_str("</p>\n");

    shell("Patients", &body)
}

/// A single patient's report page. `fragment` is already-rendered HTML.
pub fn report_page(id: &str, fragment: &str) -> String {
    let id = escape_html(id);
    let body = format!(
        "{fragment}\n\
         <p><a href=\"/\">&laquo; back to listing</a> \
         <a href=\"/generate_pdf/{id}\">download PDF</a> \
         <a href=\"/patient/{id}/diagnosis\">AI diagnosis</a></p>\n",
    );
    shell(&format!("Patient {id}"), &body)
}

/// An error page for any failed request.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>{code} {reason}</h1>\n\
         <p class=\"error\">{message}</p>\n\
         <p><a href=\"/\">&laquo; back to listing</a></p>\n",
        code = status.as_u16(),
        reason = status.canonical_reason().unwrap_or("Error"),
        message = escape_html(message),
    );
    shell("Error", &body)
}
