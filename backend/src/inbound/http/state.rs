//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ExerciseLogCommand, ExerciseLogQuery, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub log_command: Arc<dyn ExerciseLogCommand>,
    pub log_query: Arc<dyn ExerciseLogQuery>,
    pub users: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Construct state from individual ports.
    pub fn new(
        log_command: Arc<dyn ExerciseLogCommand>,
        log_query: Arc<dyn ExerciseLogQuery>,
        users: Arc<dyn UsersQuery>,
    ) -> Self {
        Self {
            log_command,
            log_query,
            users,
        }
    }

    /// Construct state from one service implementing every port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use exercise_log::domain::ExerciseLogService;
    /// use exercise_log::inbound::http::state::HttpState;
    /// use exercise_log::outbound::memory::InMemoryUserRepository;
    ///
    /// let service = ExerciseLogService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(mockable::DefaultClock),
    /// );
    /// let state = HttpState::from_service(Arc::new(service));
    /// let _users = state.users.clone();
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: ExerciseLogCommand + ExerciseLogQuery + UsersQuery + 'static,
    {
        Self::new(service.clone(), service.clone(), service)
    }
}
