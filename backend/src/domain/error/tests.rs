//! Tests for domain error construction and trace propagation.

use super::*;
use rstest::{fixture, rstest};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn base_error() -> Error {
    Error::invalid_limit("limit must be an integer")
}

#[rstest]
#[case(Error::missing_parameter("userId"), ErrorCode::MissingParameter)]
#[case(Error::invalid_date("from is not a valid date"), ErrorCode::InvalidDate)]
#[case(Error::user_not_found("unknown _id"), ErrorCode::UserNotFound)]
#[case(Error::duplicate_username("username already taken"), ErrorCode::DuplicateUsername)]
#[case(Error::validation_failure("description is required"), ErrorCode::ValidationFailure)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn missing_parameter_names_the_field() {
    let err = Error::missing_parameter("userId");
    assert_eq!(err.message(), "missing required parameter: userId");
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidLimit, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn trace_id_is_none_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[tokio::test]
async fn trace_id_is_captured_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid uuid");
    let error = TraceId::scope(trace_id, async { Error::user_not_found("unknown _id") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
#[case(ErrorCode::InvalidDate, true)]
#[case(ErrorCode::DuplicateUsername, true)]
#[case(ErrorCode::ServiceUnavailable, false)]
#[case(ErrorCode::InternalError, false)]
fn client_error_classification(#[case] code: ErrorCode, #[case] expected: bool) {
    assert_eq!(code.is_client_error(), expected);
}
