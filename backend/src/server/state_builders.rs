//! Builders for HTTP state backed by the configured store.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use exercise_log::domain::ExerciseLogService;
use exercise_log::inbound::http::state::HttpState;
use exercise_log::outbound::memory::InMemoryUserRepository;
use exercise_log::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

/// Build handler state over PostgreSQL when a pool is configured, otherwise
/// over a process-local in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL exercise log store");
            let repository = Arc::new(DieselUserRepository::new(pool.clone()));
            HttpState::from_service(Arc::new(ExerciseLogService::new(repository, clock)))
        }
        None => {
            info!("using in-memory exercise log store");
            let repository = Arc::new(InMemoryUserRepository::new());
            HttpState::from_service(Arc::new(ExerciseLogService::new(repository, clock)))
        }
    };
    web::Data::new(state)
}
