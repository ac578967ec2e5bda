//! Port abstraction for user and exercise-log persistence adapters.
//!
//! A user's log is an append-only sequence; adapters must hand entries back
//! in the order they were appended. Log reads go through
//! [`UserRepository::find_log`] so an adapter can push the date filter and
//! limit down into its own query language, or evaluate them in memory with
//! [`LogQuery::select`].
use async_trait::async_trait;

use crate::domain::{Exercise, LogQuery, LogView, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already holds the username.
        DuplicateUsername { username: String } => "username already taken: {username}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user with an empty log.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Every registered user, in registration order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Append `exercise` to the end of the user's log.
    ///
    /// Returns `Ok(None)` when no user has the identifier.
    async fn append_exercise(
        &self,
        user_id: &UserId,
        exercise: &Exercise,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Read the entries of the queried user's log that pass the query.
    ///
    /// User lookup and entry selection observe a single consistent snapshot.
    /// Returns `Ok(None)` when no user has the identifier.
    async fn find_log(&self, query: &LogQuery) -> Result<Option<LogView>, UserPersistenceError>;
}
