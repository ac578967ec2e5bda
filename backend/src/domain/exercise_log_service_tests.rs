//! Tests for the exercise log service.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockUserRepository;

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn make_service(repo: MockUserRepository) -> ExerciseLogService<MockUserRepository> {
    ExerciseLogService::new(
        Arc::new(repo),
        Arc::new(FixtureClock {
            utc_now: fixture_now(),
        }),
    )
}

fn alice() -> User {
    User::try_from_strings("alice-id", "alice").expect("fixture user")
}

fn append_request(date: Option<RawDate>) -> AppendExerciseRequest {
    AppendExerciseRequest {
        user_id: Some("alice-id".to_owned()),
        description: Some("run".to_owned()),
        duration: Some(RawDuration::Text("30".to_owned())),
        date,
    }
}

fn log_request(user_id: &str) -> LogQueryRequest {
    LogQueryRequest {
        user_id: Some(user_id.to_owned()),
        ..LogQueryRequest::default()
    }
}

#[tokio::test]
async fn register_user_persists_trimmed_username() {
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .withf(|user| user.username().as_ref() == "alice")
        .times(1)
        .return_once(|_| Ok(()));

    let user = make_service(repo)
        .register_user(RegisterUserRequest {
            username: Some("  alice ".to_owned()),
        })
        .await
        .expect("registration succeeds");

    assert_eq!(user.username().as_ref(), "alice");
    assert!(!user.id().as_ref().is_empty());
}

#[rstest]
#[case(None)]
#[case(Some("   "))]
#[tokio::test]
async fn register_user_requires_a_username(#[case] username: Option<&str>) {
    let mut repo = MockUserRepository::new();
    repo.expect_create().never();

    let err = make_service(repo)
        .register_user(RegisterUserRequest {
            username: username.map(str::to_owned),
        })
        .await
        .expect_err("rejected");

    assert_eq!(err.code(), ErrorCode::ValidationFailure);
    assert_eq!(err.message(), "username is required");
}

#[tokio::test]
async fn register_user_maps_duplicates() {
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::duplicate_username("alice")));

    let err = make_service(repo)
        .register_user(RegisterUserRequest {
            username: Some("alice".to_owned()),
        })
        .await
        .expect_err("duplicate");

    assert_eq!(err.code(), ErrorCode::DuplicateUsername);
    assert_eq!(err.message(), "username already taken");
}

#[tokio::test]
async fn append_defaults_the_date_to_today() {
    let mut repo = MockUserRepository::new();
    repo.expect_append_exercise()
        .times(1)
        .return_once(|_, _| Ok(Some(alice())));

    let appended = make_service(repo)
        .append_exercise(append_request(None))
        .await
        .expect("append succeeds");

    let expected = fixture_now().with_timezone(&Local).date_naive();
    assert_eq!(appended.exercise.date().as_naive_date(), expected);
    assert_eq!(appended.user, alice());
}

#[tokio::test]
async fn append_normalises_a_supplied_date() {
    let mut repo = MockUserRepository::new();
    repo.expect_append_exercise()
        .withf(|user_id, exercise| {
            user_id.as_ref() == "alice-id" && exercise.date().to_string() == "Wed Jan 10 2024"
        })
        .times(1)
        .return_once(|_, _| Ok(Some(alice())));

    let appended = make_service(repo)
        .append_exercise(append_request(Some(RawDate::Text("2024-01-10".to_owned()))))
        .await
        .expect("append succeeds");

    assert_eq!(
        appended.exercise.date().as_naive_date(),
        NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date")
    );
    assert_eq!(appended.exercise.duration().as_f64(), 30.0);
}

#[rstest]
#[case(AppendExerciseRequest { user_id: None, ..append_request(None) }, ErrorCode::MissingParameter)]
#[case(AppendExerciseRequest { description: Some(" ".to_owned()), ..append_request(None) }, ErrorCode::ValidationFailure)]
#[case(AppendExerciseRequest { duration: None, ..append_request(None) }, ErrorCode::ValidationFailure)]
#[case(AppendExerciseRequest { duration: Some(RawDuration::Text("soon".to_owned())), ..append_request(None) }, ErrorCode::ValidationFailure)]
#[case(append_request(Some(RawDate::Text("someday".to_owned()))), ErrorCode::InvalidDate)]
#[tokio::test]
async fn append_validates_before_touching_storage(
    #[case] request: AppendExerciseRequest,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_append_exercise().never();

    let err = make_service(repo)
        .append_exercise(request)
        .await
        .expect_err("rejected");

    assert_eq!(err.code(), expected);
}

#[tokio::test]
async fn append_reports_unknown_users() {
    let mut repo = MockUserRepository::new();
    repo.expect_append_exercise()
        .times(1)
        .return_once(|_, _| Ok(None));

    let err = make_service(repo)
        .append_exercise(append_request(None))
        .await
        .expect_err("unknown user");

    assert_eq!(err.code(), ErrorCode::UserNotFound);
    assert_eq!(err.message(), "unknown _id");
}

#[tokio::test]
async fn query_log_passes_the_parsed_query_to_the_repository() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_log()
        .withf(|query| query.user_id().as_ref() == "alice-id" && query.limit() == Some(2))
        .times(1)
        .return_once(|_| Ok(Some(LogView::new(alice(), Vec::new()))));

    let request = LogQueryRequest {
        limit: Some("2".to_owned()),
        ..log_request("alice-id")
    };
    let view = make_service(repo)
        .query_log(&request)
        .await
        .expect("query succeeds");

    assert_eq!(view.username().as_ref(), "alice");
    assert!(view.log().is_empty());
}

#[tokio::test]
async fn query_log_rejects_invalid_parameters_without_storage_access() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_log().never();

    let request = LogQueryRequest {
        limit: Some("abc".to_owned()),
        ..log_request("alice-id")
    };
    let err = make_service(repo)
        .query_log(&request)
        .await
        .expect_err("invalid limit");

    assert_eq!(err.code(), ErrorCode::InvalidLimit);
}

#[tokio::test]
async fn query_log_reports_unknown_users() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_log().times(1).return_once(|_| Ok(None));

    let err = make_service(repo)
        .query_log(&log_request("nobody"))
        .await
        .expect_err("unknown user");

    assert_eq!(err.code(), ErrorCode::UserNotFound);
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn storage_failures_map_to_service_errors(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_list().times(1).return_once(move || Err(failure));

    let err = make_service(repo)
        .list_users()
        .await
        .expect_err("storage failure");

    assert_eq!(err.code(), expected);
}

#[tokio::test]
async fn list_users_returns_repository_order() {
    let bob = User::try_from_strings("bob-id", "bob").expect("fixture user");
    let users = vec![alice(), bob];
    let expected = users.clone();
    let mut repo = MockUserRepository::new();
    repo.expect_list().times(1).return_once(move || Ok(users));

    let listed = make_service(repo).list_users().await.expect("list succeeds");

    assert_eq!(listed, expected);
}
