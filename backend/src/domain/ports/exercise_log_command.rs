//! Driving port for mutations: registering users and appending exercises.
//!
//! Request payloads keep every field optional and loosely typed so JSON and
//! URL-encoded form bodies deserialise into the same shape; the service owns
//! validation and reports the first failing field.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{Error, Exercise, User};

/// Raw registration payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterUserRequest {
    pub username: Option<String>,
}

/// Duration as submitted: a JSON number or form text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Minutes(f64),
    Text(String),
}

/// Date as submitted: epoch milliseconds or any normalizable text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    EpochMillis(i64),
    Text(String),
}

/// Raw append payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppendExerciseRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub description: Option<String>,
    pub duration: Option<RawDuration>,
    pub date: Option<RawDate>,
}

/// Outcome of a successful append: the owner and the stored entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AppendedExercise {
    pub user: User,
    pub exercise: Exercise,
}

/// Domain use-case port for log mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseLogCommand: Send + Sync {
    /// Register a new user with an empty log.
    async fn register_user(&self, request: RegisterUserRequest) -> Result<User, Error>;

    /// Append one exercise to the end of a user's log.
    async fn append_exercise(
        &self,
        request: AppendExerciseRequest,
    ) -> Result<AppendedExercise, Error>;
}
