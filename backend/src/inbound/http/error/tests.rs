//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use rstest::{fixture, rstest};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn read_error_response(error: &Error) -> (StatusCode, Option<String>, String) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    assert_eq!(
        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("text/plain; charset=utf-8")
    );
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = String::from_utf8(bytes.to_vec()).expect("utf-8 body");
    (status, trace_id, body)
}

#[rstest]
#[case(Error::missing_parameter("userId"), StatusCode::BAD_REQUEST)]
#[case(Error::invalid_date("from is not a valid date: x"), StatusCode::BAD_REQUEST)]
#[case(Error::invalid_limit("limit must be a non-negative integer: x"), StatusCode::BAD_REQUEST)]
#[case(Error::validation_failure("description is required"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("not found"), StatusCode::NOT_FOUND)]
#[case(Error::duplicate_username("username already taken"), StatusCode::CONFLICT)]
#[case(Error::user_not_found("unknown _id"), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(Error::service_unavailable("pool"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn client_errors_carry_their_message(expected_trace_id: String) {
    let error = Error::user_not_found("unknown _id").with_trace_id(expected_trace_id.clone());

    let (status, trace_id, body) = read_error_response(&error).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(trace_id, Some(expected_trace_id));
    assert_eq!(body, "unknown _id");
}

#[rstest]
#[case(Error::internal("connection refused on 10.0.0.3"), "Internal server error")]
#[case(Error::service_unavailable("pool checkout timed out"), "Service unavailable")]
#[actix_web::test]
async fn server_errors_are_redacted(#[case] error: Error, #[case] expected: &str) {
    let error = error.with_trace_id(TRACE_ID);

    let (_, trace_id, body) = read_error_response(&error).await;

    assert_eq!(body, expected);
    assert_eq!(trace_id.as_deref(), Some(TRACE_ID));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let (_, trace_id, body) = read_error_response(&Error::missing_parameter("userId")).await;

    assert_eq!(trace_id, None);
    assert_eq!(body, "missing required parameter: userId");
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let actix_err = actix_web::error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.trace_id(), None);
}

#[rstest]
#[actix_web::test]
async fn unknown_routes_answer_not_found() {
    let err = not_found().await.expect_err("always fails");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "not found");
}
