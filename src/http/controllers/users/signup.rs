use actix_web::http::header;
use actix_web::{web, HttpResponse};

use crate::http::error::Result;
use crate::types::form::Signup;

/// `POST /form-validation-example`
///
/// The authoritative re-run of the shape validators. Availability is NOT
/// re-checked here: the debounced client-side probes are advisory, and
/// whatever eventually persists accounts owns uniqueness. That gap is why
/// this handler takes no directory handle.
///
/// Registration proper is out of scope; a submission that clears
/// validation is answered with a redirect home.
#[tracing::instrument(skip_all)]
pub async fn signup(form: web::Form<Signup>) -> Result<HttpResponse> {
    form.validate()?;

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish())
}
