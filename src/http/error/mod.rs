use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use tracing_error::SpanTrace;

use crate::types;

pub type Result<T> = std::result::Result<T, Error>;

/// Handler-level error: the serializable taxonomy in [`types::Error`]
/// plus the span trace captured where things went sideways, so the log
/// line can say which request path produced it.
pub struct Error {
    error_type: types::Error,
    trace: SpanTrace,
}

impl Error {
    #[must_use]
    pub fn new(error_type: types::Error) -> Self {
        Self {
            error_type,
            trace: SpanTrace::capture(),
        }
    }

    #[must_use]
    pub fn as_type(&self) -> &types::Error {
        &self.error_type
    }
}

impl From<types::ValidationErrors> for Error {
    fn from(errors: types::ValidationErrors) -> Self {
        Self::new(types::Error::InvalidFormBody(errors))
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Error")
            .field("type", &self.error_type)
            .field("trace", &self.trace)
            .finish()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.error_type)?;
        std::fmt::Display::fmt(&self.trace, f)
    }
}

impl actix_web::ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.error_type {
            types::Error::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            types::Error::InvalidFormBody(..) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code()).json(&self.error_type)
    }
}
