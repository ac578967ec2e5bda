//! HTTP adapter mapping for domain errors.
//!
//! Failures leave the service as a status code plus a single line of plain
//! text. Server-side failures are redacted so driver and pool messages never
//! reach clients; the `trace-id` header links the response to the logs.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";
const UNAVAILABLE_MESSAGE: &str = "Service unavailable";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::MissingParameter
        | ErrorCode::InvalidDate
        | ErrorCode::InvalidLimit
        | ErrorCode::ValidationFailure => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::DuplicateUsername => StatusCode::CONFLICT,
        ErrorCode::UserNotFound => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn client_message(error: &Error) -> &str {
    match error.code() {
        ErrorCode::InternalError => INTERNAL_MESSAGE,
        ErrorCode::ServiceUnavailable => UNAVAILABLE_MESSAGE,
        _ => error.message(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        builder.content_type(ContentType::plaintext());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.body(client_message(self).to_owned())
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_MESSAGE)
    }
}

/// Error handler for `web::JsonConfig`.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    Error::validation_failure(format!("invalid JSON body: {err}")).into()
}

/// Error handler for `web::FormConfig`.
pub fn form_error_handler(
    err: actix_web::error::UrlencodedError,
    _req: &HttpRequest,
) -> actix_web::Error {
    Error::validation_failure(format!("invalid form body: {err}")).into()
}

/// Error handler for `web::QueryConfig`.
pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    Error::validation_failure(format!("invalid query string: {err}")).into()
}

/// Default service answering unknown routes.
pub async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("not found"))
}

#[cfg(test)]
mod tests;
