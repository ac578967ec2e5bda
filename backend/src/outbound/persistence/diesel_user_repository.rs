//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Each log lives in the `exercises` table keyed by owner; append order is
//! the `id` sequence. Log queries translate the [`LogQuery`] predicate into
//! SQL so only selected rows leave the database.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Exercise, LogQuery, LogView, User, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{ExerciseRow, NewExerciseRow, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{exercises, users};

const USERNAME_CONSTRAINT: &str = "users_username_key";

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    User::try_from(row).map_err(|err| UserPersistenceError::query(err.to_string()))
}

fn rows_to_log(rows: Vec<ExerciseRow>) -> Result<Vec<Exercise>, UserPersistenceError> {
    rows.into_iter()
        .map(Exercise::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| UserPersistenceError::query(err.to_string()))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .execute(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err, USERNAME_CONSTRAINT) {
                    UserPersistenceError::duplicate_username(user.username().as_ref())
                } else {
                    map_diesel_error(err)
                }
            })?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order_by((users::created_at, users::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn append_exercise(
        &self,
        user_id: &UserId,
        exercise: &Exercise,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner = user_id.as_ref();

        let row = conn
            .transaction(|conn| {
                async move {
                    let Some(row) = users::table
                        .filter(users::id.eq(owner))
                        .select(UserRow::as_select())
                        .first(conn)
                        .await
                        .optional()?
                    else {
                        return Ok(None);
                    };

                    diesel::insert_into(exercises::table)
                        .values(NewExerciseRow::new(owner, exercise))
                        .execute(conn)
                        .await?;

                    Ok::<_, diesel::result::Error>(Some(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_log(&self, query: &LogQuery) -> Result<Option<LogView>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner = query.user_id().as_ref();
        let range = query.range();
        let limit = query
            .limit()
            .map(|limit| i64::try_from(limit).unwrap_or(i64::MAX));

        let rows = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let Some(user) = users::table
                        .filter(users::id.eq(owner))
                        .select(UserRow::as_select())
                        .first(conn)
                        .await
                        .optional()?
                    else {
                        return Ok(None);
                    };

                    let mut entries = exercises::table
                        .filter(exercises::user_id.eq(owner))
                        .select(ExerciseRow::as_select())
                        .order_by(exercises::id)
                        .into_boxed();
                    if let Some(from) = range.from() {
                        entries = entries.filter(exercises::date.ge(from.as_naive_date()));
                    }
                    if let Some(to) = range.to() {
                        entries = entries.filter(exercises::date.le(to.as_naive_date()));
                    }
                    if let Some(limit) = limit {
                        entries = entries.limit(limit);
                    }
                    let entries: Vec<ExerciseRow> = entries.load(conn).await?;

                    Ok::<_, diesel::result::Error>(Some((user, entries)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let Some((user, entries)) = rows else {
            return Ok(None);
        };
        Ok(Some(LogView::new(row_to_user(user)?, rows_to_log(entries)?)))
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping coverage; query behaviour is exercised against the
    //! in-memory adapter, which shares the same predicate.
    use super::*;
    use diesel::result::DatabaseErrorKind;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, UserPersistenceError::connection("timed out"));
    }

    #[rstest]
    fn closed_connections_map_to_connection_errors() {
        let error = diesel::result::Error::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );
        assert!(matches!(
            map_diesel_error(error),
            UserPersistenceError::Connection { .. }
        ));
    }

    #[rstest]
    fn corrupt_rows_map_to_query_errors() {
        let row = UserRow {
            id: "id".to_owned(),
            username: "   ".to_owned(),
        };
        assert!(matches!(
            row_to_user(row),
            Err(UserPersistenceError::Query { .. })
        ));
    }
}
