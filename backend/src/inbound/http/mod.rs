//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod exercises;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

/// Register extractor error handlers and the exercise log routes.
///
/// Malformed bodies and query strings are answered with the same plain-text
/// `400` shape as domain validation failures.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::FormConfig::default().error_handler(error::form_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler));
    exercises::configure(cfg);
}
