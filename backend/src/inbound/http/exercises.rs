//! Exercise log API handlers.
//!
//! ```text
//! POST /api/exercise/new-user {"username":"alice"}
//! GET  /api/exercise/users
//! POST /api/exercise/add {"userId":"..","description":"run","duration":30,"date":"2024-01-10"}
//! GET  /api/exercise/log?userId=..&from=2024-01-01&to=2024-01-31&limit=10
//! ```
//!
//! Write endpoints accept JSON or URL-encoded form bodies with the same
//! field names. Failures are plain text; see [`crate::inbound::http::error`].

use actix_web::web::{self, Either};
use actix_web::{get, post};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    AppendExerciseRequest, AppendedExercise, LogQueryRequest, RawDate, RawDuration,
    RegisterUserRequest,
};
use crate::domain::{Exercise, LogView, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Body accepted either as JSON or as an HTML form.
type Body<T> = Either<web::Json<T>, web::Form<T>>;

fn into_inner<T>(body: Body<T>) -> T {
    match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

/// Registration body for `POST /api/exercise/new-user`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct NewUserBody {
    #[schema(example = "alice")]
    pub username: Option<String>,
}

impl From<NewUserBody> for RegisterUserRequest {
    fn from(value: NewUserBody) -> Self {
        Self {
            username: value.username,
        }
    }
}

/// Append body for `POST /api/exercise/add`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddExerciseBody {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[schema(example = "run")]
    pub description: Option<String>,
    /// Minutes, as a number or numeric text.
    #[schema(value_type = Option<f64>, example = 30)]
    pub duration: Option<RawDuration>,
    /// Any recognised date text, or epoch milliseconds. Defaults to today.
    #[schema(value_type = Option<String>, example = "2024-01-10")]
    pub date: Option<RawDate>,
}

impl From<AddExerciseBody> for AppendExerciseRequest {
    fn from(value: AddExerciseBody) -> Self {
        Self {
            user_id: value.user_id,
            description: value.description,
            duration: value.duration,
            date: value.date,
        }
    }
}

/// Query string for `GET /api/exercise/log`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogParams {
    /// Identifier returned at registration.
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    /// Inclusive lower date bound.
    pub from: Option<String>,
    /// Inclusive upper date bound.
    pub to: Option<String>,
    /// Maximum number of entries, a non-negative integer.
    pub limit: Option<String>,
}

impl From<LogParams> for LogQueryRequest {
    fn from(value: LogParams) -> Self {
        Self {
            user_id: value.user_id,
            from: value.from,
            to: value.to,
            limit: value.limit,
        }
    }
}

/// Identity fields of a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
        }
    }
}

/// One log entry with its rendered date.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct ExerciseResponse {
    pub description: String,
    pub duration: f64,
    #[schema(example = "Mon Jan 01 2024")]
    pub date: String,
}

impl From<&Exercise> for ExerciseResponse {
    fn from(exercise: &Exercise) -> Self {
        Self {
            description: exercise.description().to_string(),
            duration: exercise.duration().as_f64(),
            date: exercise.date().to_string(),
        }
    }
}

/// The user's identity plus the entry just appended.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct AppendedExerciseResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub description: String,
    pub duration: f64,
    #[schema(example = "Mon Jan 01 2024")]
    pub date: String,
}

impl From<AppendedExercise> for AppendedExerciseResponse {
    fn from(value: AppendedExercise) -> Self {
        let UserResponse { id, username } = UserResponse::from(&value.user);
        let ExerciseResponse {
            description,
            duration,
            date,
        } = ExerciseResponse::from(&value.exercise);
        Self {
            id,
            username,
            description,
            duration,
            date,
        }
    }
}

/// The selected slice of a user's log.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct LogResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub log: Vec<ExerciseResponse>,
}

impl From<LogView> for LogResponse {
    fn from(view: LogView) -> Self {
        Self {
            id: view.id().to_string(),
            username: view.username().to_string(),
            log: view.log().iter().map(ExerciseResponse::from).collect(),
        }
    }
}

/// Register a user with an empty log.
#[utoipa::path(
    post,
    path = "/api/exercise/new-user",
    request_body(content(
        (NewUserBody = "application/json"),
        (NewUserBody = "application/x-www-form-urlencoded")
    )),
    responses(
        (status = 200, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid username", body = String, content_type = "text/plain"),
        (status = 409, description = "Username already taken", body = String, content_type = "text/plain"),
        (status = 503, description = "Storage unavailable")
    ),
    tags = ["exercise"],
    operation_id = "registerUser"
)]
#[post("/new-user")]
pub async fn register_user(
    state: web::Data<HttpState>,
    body: Body<NewUserBody>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state
        .log_command
        .register_user(into_inner(body).into())
        .await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// List every user in registration order.
#[utoipa::path(
    get,
    path = "/api/exercise/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 503, description = "Storage unavailable")
    ),
    tags = ["exercise"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.iter().map(UserResponse::from).collect()))
}

/// Append one exercise to a user's log.
#[utoipa::path(
    post,
    path = "/api/exercise/add",
    request_body(content(
        (AddExerciseBody = "application/json"),
        (AddExerciseBody = "application/x-www-form-urlencoded")
    )),
    responses(
        (status = 200, description = "Exercise appended", body = AppendedExerciseResponse),
        (status = 400, description = "Invalid entry", body = String, content_type = "text/plain"),
        (status = 422, description = "Unknown user", body = String, content_type = "text/plain"),
        (status = 503, description = "Storage unavailable")
    ),
    tags = ["exercise"],
    operation_id = "addExercise"
)]
#[post("/add")]
pub async fn add_exercise(
    state: web::Data<HttpState>,
    body: Body<AddExerciseBody>,
) -> ApiResult<web::Json<AppendedExerciseResponse>> {
    let appended = state
        .log_command
        .append_exercise(into_inner(body).into())
        .await?;
    Ok(web::Json(appended.into()))
}

/// Query a user's log by inclusive date range and count.
#[utoipa::path(
    get,
    path = "/api/exercise/log",
    params(LogParams),
    responses(
        (status = 200, description = "Selected entries in stored order", body = LogResponse),
        (status = 400, description = "Missing or invalid parameter", body = String, content_type = "text/plain"),
        (status = 422, description = "Unknown user", body = String, content_type = "text/plain"),
        (status = 503, description = "Storage unavailable")
    ),
    tags = ["exercise"],
    operation_id = "exerciseLog"
)]
#[get("/log")]
pub async fn exercise_log(
    state: web::Data<HttpState>,
    params: web::Query<LogParams>,
) -> ApiResult<web::Json<LogResponse>> {
    let request = LogQueryRequest::from(params.into_inner());
    let view = state.log_query.query_log(&request).await?;
    Ok(web::Json(view.into()))
}

/// Register the exercise routes on a scope or app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/exercise")
            .service(register_user)
            .service(list_users)
            .service(add_exercise)
            .service(exercise_log),
    );
}

#[cfg(test)]
#[path = "exercises_tests.rs"]
mod tests;
