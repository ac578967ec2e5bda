//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope by switching on
//! [`ErrorCode`].

use std::fmt;

use crate::domain::TraceId;

/// Closed set of failure categories surfaced by the exercise log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A required request parameter was omitted.
    MissingParameter,
    /// A `from`/`to` bound or an entry date could not be parsed.
    InvalidDate,
    /// The `limit` parameter is not a non-negative integer.
    InvalidLimit,
    /// The user identifier does not resolve to a stored user.
    UserNotFound,
    /// Registration collided with an existing username.
    DuplicateUsername,
    /// A stored-entity constraint was violated.
    ValidationFailure,
    /// The requested route does not exist.
    NotFound,
    /// A backing service is temporarily unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the service.
    InternalError,
}

impl ErrorCode {
    /// Stable snake-case identifier used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingParameter => "missing_parameter",
            Self::InvalidDate => "invalid_date",
            Self::InvalidLimit => "invalid_limit",
            Self::UserNotFound => "user_not_found",
            Self::DuplicateUsername => "duplicate_username",
            Self::ValidationFailure => "validation_failure",
            Self::NotFound => "not_found",
            Self::ServiceUnavailable => "service_unavailable",
            Self::InternalError => "internal_error",
        }
    }

    /// Whether the failure was caused by the client rather than the service.
    pub fn is_client_error(self) -> bool {
        !matches!(self, Self::ServiceUnavailable | Self::InternalError)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
/// - `trace_id`, when present, must be non-empty once trimmed.
///
/// # Examples
/// ```
/// use exercise_log::domain::{Error, ErrorCode};
///
/// let err = Error::user_not_found("unknown _id");
/// assert_eq!(err.code(), ErrorCode::UserNotFound);
/// assert_eq!(err.to_string(), "unknown _id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    #[error("error message must not be empty")]
    EmptyMessage,
    #[error("trace identifier must not be empty")]
    EmptyTraceId,
}

impl Error {
    /// Create a new error, panicking if validation fails.
    ///
    /// The trace identifier in scope (if any) is captured automatically.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured when the error was created.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach an explicit trace identifier, panicking if it is blank.
    pub fn with_trace_id(self, trace_id: impl Into<String>) -> Self {
        match self.try_with_trace_id(trace_id) {
            Ok(value) => value,
            Err(err) => panic!("trace identifiers must satisfy validation: {err}"),
        }
    }

    /// Fallible variant of [`Error::with_trace_id`].
    pub fn try_with_trace_id(
        mut self,
        trace_id: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let trace_id = trace_id.into();
        if trace_id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        self.trace_id = Some(trace_id);
        Ok(self)
    }

    /// Convenience constructor for [`ErrorCode::MissingParameter`] naming the field.
    pub fn missing_parameter(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingParameter,
            format!("missing required parameter: {field}"),
        )
    }

    /// Convenience constructor for [`ErrorCode::InvalidDate`].
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidDate, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidLimit`].
    pub fn invalid_limit(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidLimit, message)
    }

    /// Convenience constructor for [`ErrorCode::UserNotFound`].
    pub fn user_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UserNotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::DuplicateUsername`].
    pub fn duplicate_username(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateUsername, message)
    }

    /// Convenience constructor for [`ErrorCode::ValidationFailure`].
    pub fn validation_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailure, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
