//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP endpoint and response schema from the
//! inbound layer. The document backs Swagger UI in debug builds and is
//! printed by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::exercises::{
    AddExerciseBody, AppendedExerciseResponse, ExerciseResponse, LogResponse, NewUserBody,
    UserResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exercise log API",
        description = "Register users, append exercises and query date-bounded logs."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::exercises::register_user,
        crate::inbound::http::exercises::list_users,
        crate::inbound::http::exercises::add_exercise,
        crate::inbound::http::exercises::exercise_log,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        NewUserBody,
        AddExerciseBody,
        UserResponse,
        ExerciseResponse,
        AppendedExerciseResponse,
        LogResponse
    )),
    tags(
        (name = "exercise", description = "Users and their exercise logs"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
