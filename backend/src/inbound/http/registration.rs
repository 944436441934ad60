//! Registration page handlers.
//!
//! ```text
//! GET /
//! POST /register name=Asha+Rao&address=...&age=21&qualification=B.Sc&percentage=87.5&year=2023
//! ```
//!
//! Both routes answer `200 OK` with the rendered page. Outcomes of a
//! submission, including malformed bodies, are reported in a banner rather
//! than through the status code.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, post, web};
use futures_util::StreamExt;
use tracing::warn;

use crate::domain::{RegistrationError, StudentSubmission};
use crate::inbound::http::form::render_form;
use crate::inbound::http::state::HttpState;

/// Banner shown when no database connection could be opened.
pub const CONNECTION_FAILURE_MESSAGE: &str =
    "Failed to connect to the database. Please try again later.";

/// Largest form body accepted before the submission is refused with a banner.
pub const MAX_FORM_BYTES: usize = 64 * 1024;

fn html(page: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page)
}

/// Serve the empty registration form.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use registration::inbound::http::index;
///
/// let app = App::new().service(index);
/// ```
#[get("/")]
pub async fn index() -> HttpResponse {
    html(render_form(None, None))
}

/// Register one student from a URL-encoded form body.
///
/// Bodies over [`MAX_FORM_BYTES`] are not decoded; the page reports the
/// refusal and nothing reaches the database.
#[post("/register")]
pub async fn register(state: web::Data<HttpState>, payload: web::Payload) -> HttpResponse {
    let body = match read_form(payload).await {
        Ok(body) => body,
        Err(detail) => {
            warn!(%detail, "form submission refused");
            let error = format!("An error occurred: {detail}");
            return html(render_form(None, Some(&error)));
        }
    };
    let submission = StudentSubmission::from_urlencoded(&body);
    let page = match state.registration.register(&submission).await {
        Ok(receipt) => {
            let message = format!(
                "Student {} registered successfully!",
                receipt.student.name()
            );
            render_form(Some(&message), None)
        }
        Err(error) => render_form(None, Some(&failure_message(&error))),
    };
    html(page)
}

async fn read_form(mut payload: web::Payload) -> Result<web::BytesMut, String> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|err| format!("could not read the form submission: {err}"))?;
        if body.len() + chunk.len() > MAX_FORM_BYTES {
            return Err(format!(
                "form submission is larger than {MAX_FORM_BYTES} bytes"
            ));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn failure_message(error: &RegistrationError) -> String {
    if error.is_connection() {
        CONNECTION_FAILURE_MESSAGE.to_owned()
    } else {
        format!("An error occurred: {error}")
    }
}
