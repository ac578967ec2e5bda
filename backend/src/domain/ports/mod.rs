//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`ExerciseLogQuery`, `ExerciseLogCommand`, `UsersQuery`) are
//! what inbound adapters call; the driven port `UserRepository` is what
//! storage adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod exercise_log_command;
mod exercise_log_query;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use exercise_log_command::MockExerciseLogCommand;
pub use exercise_log_command::{
    AppendExerciseRequest, AppendedExercise, ExerciseLogCommand, RawDate, RawDuration,
    RegisterUserRequest,
};
#[cfg(test)]
pub use exercise_log_query::MockExerciseLogQuery;
pub use exercise_log_query::{ExerciseLogQuery, LogQueryRequest};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
