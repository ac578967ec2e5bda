//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities for the exercise log and the
//! service that drives them. Types are immutable once constructed; invariants
//! and serialisation contracts are documented on each type.
//!
//! Public surface:
//! - `CalendarDay` normalises every date to a whole calendar day.
//! - `User`, `UserId`, `Username` describe a registered identity.
//! - `Exercise` and its value types describe one log entry.
//! - `LogQuery` and `LogView` validate and answer log queries.
//! - `ExerciseLogService` implements the driving ports in [`ports`].
//! - `Error` and `ErrorCode` are the transport-agnostic failure type.

pub mod calendar_day;
pub mod error;
pub mod exercise;
pub mod exercise_log_service;
pub mod log_query;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::calendar_day::{CalendarDay, DateField, InvalidDate, RENDER_FORMAT};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::exercise::{Description, DurationMinutes, Exercise, ExerciseValidationError};
pub use self::exercise_log_service::ExerciseLogService;
pub use self::log_query::{DateRange, InvalidLimit, LogQuery, LogView, parse_limit};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};
