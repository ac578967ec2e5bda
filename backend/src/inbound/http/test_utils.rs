//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};

use crate::Trace;
use crate::domain::ExerciseLogService;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryUserRepository;

/// State backed by a fresh in-memory store and the system clock.
pub fn memory_state() -> HttpState {
    let service = ExerciseLogService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(mockable::DefaultClock),
    );
    HttpState::from_service(Arc::new(service))
}

/// App with tracing, extractor error handlers and the exercise routes.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(super::configure)
}

/// Read a response body as UTF-8 text.
pub async fn read_text(response: ServiceResponse) -> String {
    let bytes = actix_test::read_body(response).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
