//! API failure type shared by every port.
//!
//! Adapters translate transport failures (HTTP status codes, timeouts,
//! malformed payloads) into [`ApiError`] so the controller can classify a
//! failure without knowing which backend produced it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request was rejected as malformed or invalid.
    InvalidRequest,
    /// Authentication failed or the session expired.
    Unauthorized,
    /// Authenticated but not permitted.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The write conflicts with existing state (for example a taken username).
    Conflict,
    /// The backend could not be reached.
    Unavailable,
    /// Anything else.
    InternalError,
}

impl ErrorCode {
    /// Classify an HTTP status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            502..=504 => Self::Unavailable,
            400..=499 => Self::InvalidRequest,
            _ => Self::InternalError,
        }
    }
}

/// Failure returned by an API port.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
/// - `status` is present whenever the backend answered; transport failures
///   carry none.
///
/// # Examples
/// ```
/// use client::domain::{ApiError, ErrorCode};
///
/// let err = ApiError::from_status(404, "no such patient");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert!(err.is_not_found());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "ApiErrorDto", into = "ApiErrorDto")]
pub struct ApiError {
    code: ErrorCode,
    status: Option<u16>,
    message: String,
    details: Option<Value>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorValidationError {
    /// The message was empty after trimming.
    EmptyMessage,
}

impl std::fmt::Display for ApiErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for ApiErrorValidationError {}

impl ApiError {
    /// Create a new error without a status, panicking if validation fails.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, None, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Result<Self, ApiErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ApiErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            status,
            message,
            details: None,
        })
    }

    /// Build an error for a backend response with the given status code.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let code = ErrorCode::from_status(status);
        match Self::try_new(code, Some(status), message) {
            Ok(value) => value,
            Err(_) => Self::with_status(code, status, format!("status {status}")),
        }
    }

    fn with_status(code: ErrorCode, status: u16, message: impl Into<String>) -> Self {
        let mut error = Self::new(code, message);
        error.status = Some(status);
        error
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// HTTP-like status, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Whether the backend reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    /// Whether the backend rejected the session.
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    /// Serialise the error for the remote error log.
    ///
    /// Falls back to the display form if JSON encoding fails.
    pub fn stringify(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.to_string())
    }

    /// Convenience constructor for a 400 response.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::with_status(ErrorCode::InvalidRequest, 400, message)
    }

    /// Convenience constructor for a 401 response.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_status(ErrorCode::Unauthorized, 401, message)
    }

    /// Convenience constructor for a 403 response.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_status(ErrorCode::Forbidden, 403, message)
    }

    /// Convenience constructor for a 404 response.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_status(ErrorCode::NotFound, 404, message)
    }

    /// Convenience constructor for a 409 response.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::with_status(ErrorCode::Conflict, 409, message)
    }

    /// Convenience constructor for a 500 response.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_status(ErrorCode::InternalError, 500, message)
    }

    /// Convenience constructor for a failure that never reached the backend.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unavailable, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {status})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorDto {
    code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<ApiError> for ApiErrorDto {
    fn from(value: ApiError) -> Self {
        Self {
            code: value.code,
            status: value.status,
            message: value.message,
            details: value.details,
        }
    }
}

impl TryFrom<ApiErrorDto> for ApiError {
    type Error = ApiErrorValidationError;

    fn try_from(value: ApiErrorDto) -> Result<Self, Self::Error> {
        let ApiErrorDto {
            code,
            status,
            message,
            details,
        } = value;

        let mut error = ApiError::try_new(code, status, message)?;
        error.details = details;
        Ok(error)
    }
}

#[cfg(test)]
mod tests;
