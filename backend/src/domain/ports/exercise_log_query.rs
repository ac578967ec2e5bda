//! Driving port for reading a user's exercise log.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{Error, LogView};

/// Raw log query parameters exactly as received from a caller.
///
/// Every field is optional text; validation happens in
/// [`crate::domain::LogQuery::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LogQueryRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// Domain use-case port for log queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseLogQuery: Send + Sync {
    /// Validate the request and return the selected entries.
    async fn query_log(&self, request: &LogQueryRequest) -> Result<LogView, Error>;
}
