//! Exercise log domain service.
//!
//! Implements the driving ports for registration, appends and log queries on
//! top of a [`UserRepository`]. Validation happens here, in a fixed order per
//! operation, before any storage work is attempted.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info};

use crate::domain::ports::{
    AppendExerciseRequest, AppendedExercise, ExerciseLogCommand, ExerciseLogQuery,
    LogQueryRequest, RawDate, RawDuration, RegisterUserRequest, UserPersistenceError,
    UserRepository, UsersQuery,
};
use crate::domain::{
    CalendarDay, DateField, Description, DurationMinutes, Error, Exercise, LogQuery, LogView,
    User, UserId, Username,
};

const UNKNOWN_ID: &str = "unknown _id";
const USERNAME_TAKEN: &str = "username already taken";

fn map_persistence_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::Connection { message } => {
            error!(%message, "user repository unavailable");
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            debug!(%username, "duplicate registration rejected");
            Error::duplicate_username(USERNAME_TAKEN)
        }
    }
}

fn present(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
}

/// Exercise log service implementing every driving port.
#[derive(Clone)]
pub struct ExerciseLogService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ExerciseLogService<R> {
    /// Create a service over `repository`; `clock` supplies the default
    /// date for appends that omit one.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    fn exercise_from_request(
        &self,
        description: Option<String>,
        duration: Option<RawDuration>,
        date: Option<RawDate>,
    ) -> Result<Exercise, Error> {
        let description = Description::new(description.unwrap_or_default())
            .map_err(|err| Error::validation_failure(err.to_string()))?;
        let duration = match duration {
            None => return Err(Error::validation_failure("duration is required")),
            Some(RawDuration::Minutes(minutes)) => DurationMinutes::new(minutes),
            Some(RawDuration::Text(text)) if text.trim().is_empty() => {
                return Err(Error::validation_failure("duration is required"));
            }
            Some(RawDuration::Text(text)) => DurationMinutes::parse(&text),
        }
        .map_err(|err| Error::validation_failure(err.to_string()))?;
        let date = match date {
            Some(RawDate::EpochMillis(millis)) => {
                CalendarDay::from_timestamp_millis(millis, DateField::Date)
            }
            Some(RawDate::Text(text)) if !text.trim().is_empty() => {
                CalendarDay::parse(&text, DateField::Date)
            }
            _ => Ok(CalendarDay::today(self.clock.as_ref())),
        }
        .map_err(|err| Error::invalid_date(err.to_string()))?;

        Ok(Exercise::new(description, duration, date))
    }
}

#[async_trait]
impl<R> ExerciseLogCommand for ExerciseLogService<R>
where
    R: UserRepository,
{
    async fn register_user(&self, request: RegisterUserRequest) -> Result<User, Error> {
        let username = Username::new(request.username.unwrap_or_default())
            .map_err(|err| Error::validation_failure(err.to_string()))?;
        let user = User::new(UserId::random(), username);

        self.repository
            .create(&user)
            .await
            .map_err(map_persistence_error)?;

        info!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok(user)
    }

    async fn append_exercise(
        &self,
        request: AppendExerciseRequest,
    ) -> Result<AppendedExercise, Error> {
        let user_id = present(request.user_id)
            .and_then(|raw| UserId::new(raw).ok())
            .ok_or_else(|| Error::missing_parameter("userId"))?;
        let exercise =
            self.exercise_from_request(request.description, request.duration, request.date)?;

        let user = self
            .repository
            .append_exercise(&user_id, &exercise)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::user_not_found(UNKNOWN_ID))?;

        Ok(AppendedExercise { user, exercise })
    }
}

#[async_trait]
impl<R> ExerciseLogQuery for ExerciseLogService<R>
where
    R: UserRepository,
{
    async fn query_log(&self, request: &LogQueryRequest) -> Result<LogView, Error> {
        let query = LogQuery::parse(request)?;

        self.repository
            .find_log(&query)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::user_not_found(UNKNOWN_ID))
    }
}

#[async_trait]
impl<R> UsersQuery for ExerciseLogService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository.list().await.map_err(map_persistence_error)
    }
}

#[cfg(test)]
#[path = "exercise_log_service_tests.rs"]
mod tests;
