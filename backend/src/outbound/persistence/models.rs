//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::{
    CalendarDay, Description, DurationMinutes, Exercise, ExerciseValidationError, User,
    UserValidationError,
};

use super::schema::{exercises, users};

/// Identity columns of the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub username: String,
}

impl TryFrom<UserRow> for User {
    type Error = UserValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        User::try_from_strings(row.id, row.username)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub username: &'a str,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: user.id().as_ref(),
            username: user.username().as_ref(),
        }
    }
}

/// Entry columns of the exercises table, without bookkeeping fields.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = exercises)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExerciseRow {
    pub description: String,
    pub duration: f64,
    pub date: NaiveDate,
}

impl TryFrom<ExerciseRow> for Exercise {
    type Error = ExerciseValidationError;

    fn try_from(row: ExerciseRow) -> Result<Self, Self::Error> {
        Ok(Exercise::new(
            Description::new(row.description)?,
            DurationMinutes::new(row.duration)?,
            CalendarDay::from(row.date),
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = exercises)]
pub(crate) struct NewExerciseRow<'a> {
    pub user_id: &'a str,
    pub description: &'a str,
    pub duration: f64,
    pub date: NaiveDate,
}

impl<'a> NewExerciseRow<'a> {
    pub fn new(user_id: &'a str, exercise: &'a Exercise) -> Self {
        Self {
            user_id,
            description: exercise.description().as_ref(),
            duration: exercise.duration().as_f64(),
            date: exercise.date().as_naive_date(),
        }
    }
}
