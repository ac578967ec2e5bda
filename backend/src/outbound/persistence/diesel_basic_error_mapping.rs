//! Diesel and pool error classification shared by the persistence adapters.
//!
//! Adapters supply constructors for their own port error enum; these helpers
//! decide which constructor a failure belongs to.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure through the adapter's connection constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map a Diesel failure to a query or connection error.
///
/// Closed connections are connection errors; everything else is a query
/// error. The driver message is logged at debug level and replaced with a
/// fixed string so it never reaches a client.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::BrokenTransactionManager => connection("database transaction state lost"),
        _ => query("database error"),
    }
}

/// Whether `error` is a unique constraint violation on `constraint`.
///
/// When the driver does not report a constraint name, any unique violation
/// matches.
pub fn is_unique_violation(error: &DieselError, constraint: &str) -> bool {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => info
            .constraint_name()
            .is_none_or(|name| name == constraint),
        _ => false,
    }
}
