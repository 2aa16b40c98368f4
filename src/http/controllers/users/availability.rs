use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::App;

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailExistsResponse {
    email_exists: bool,
}

/// `GET /api/emailExists?email=...`
///
/// An absent or empty parameter reports "does not exist". That is the
/// contract clients were built against, not an absence policy; nothing here
/// rejects an empty query, so this endpoint must never be leaned on for
/// validation.
#[tracing::instrument(skip_all)]
pub async fn email_exists(app: web::Data<App>, query: web::Query<EmailQuery>) -> HttpResponse {
    let exists = match query.email.as_deref() {
        Some(email) if !email.is_empty() => app.directory.find_by_email(email).await.is_some(),
        _ => false,
    };

    HttpResponse::Ok().json(EmailExistsResponse {
        email_exists: exists,
    })
}

#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    username: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameExistsResponse {
    username_exists: bool,
}

/// `GET /api/usernameExists?username=...`
///
/// Same shape and same permissive empty-parameter behavior as
/// [`email_exists`].
#[tracing::instrument(skip_all)]
pub async fn username_exists(
    app: web::Data<App>,
    query: web::Query<UsernameQuery>,
) -> HttpResponse {
    let exists = match query.username.as_deref() {
        Some(username) if !username.is_empty() => {
            app.directory.find_by_username(username).await.is_some()
        }
        _ => false,
    };

    HttpResponse::Ok().json(UsernameExistsResponse {
        username_exists: exists,
    })
}
