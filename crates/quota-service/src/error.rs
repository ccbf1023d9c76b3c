//! # API Error Type
//!
//! Unified error type at the service boundary.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Error Flow                                         │
//! │                                                                         │
//! │  ValidationError ──► ApiError { Validation }      ──► HTTP 400         │
//! │  CoreError       ──► ApiError { BusinessRule }    ──► HTTP 400         │
//! │  no identity     ──► ApiError { Unauthenticated } ──► HTTP 401         │
//! │  no membership   ──► ApiError { Forbidden }       ──► HTTP 403         │
//! │  missing entity  ──► ApiError { NotFound }        ──► HTTP 404         │
//! │  DbError (other) ──► ApiError { Internal }        ──► HTTP 500         │
//! │                                                                         │
//! │  Internal errors log their full detail and surface a generic           │
//! │  message; validation and business-rule rejections surface their        │
//! │  own message verbatim and are never logged as server errors.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use quota_core::{CoreError, ValidationError};
use quota_db::{BookingError, CancelError, DbError};

/// Message returned for any unexpected failure. Details stay in the log.
const INTERNAL_MESSAGE: &str = "An unexpected error occurred on the server.";

/// API error returned from service operations.
///
/// ## Serialization
/// ```json
/// {
///   "code": "BUSINESS_RULE",
///   "message": "The selected dates are already booked."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// Each code maps onto exactly one HTTP status, so the transport layer
/// never inspects messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No identity on the request (401)
    Unauthenticated,

    /// Identity present but lacks the required relationship (403)
    Forbidden,

    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    Validation,

    /// Business rule rejected the request (400)
    BusinessRule,

    /// Unexpected server failure (500)
    Internal,
}

impl ErrorCode {
    /// The HTTP status this code maps onto.
    pub const fn http_status(self) -> u16 {
        match self {
            ErrorCode::Unauthenticated => 401,
            ErrorCode::Forbidden => 403,
            ErrorCode::NotFound => 404,
            ErrorCode::Validation => 400,
            ErrorCode::BusinessRule => 400,
            ErrorCode::Internal => 500,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// No identity on the request.
    pub fn unauthenticated() -> Self {
        ApiError::new(ErrorCode::Unauthenticated, "User is not authenticated.")
    }

    /// Identity present but the relationship is missing.
    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Forbidden, message)
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Validation, message)
    }

    /// Creates a business-rule rejection.
    pub fn business(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BusinessRule, message)
    }

    /// Creates an internal error with the generic message.
    pub fn internal() -> Self {
        ApiError::new(ErrorCode::Internal, INTERNAL_MESSAGE)
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts business-rule rejections to API errors.
///
/// Every rejection keeps its own message; only wrapped validation
/// errors keep the validation code.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            other => ApiError::business(other.to_string()),
        }
    }
}

/// Converts database errors to API errors.
///
/// Anything that isn't a plain missing row is unexpected: log the
/// detail, return the generic message.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => {
                ApiError::validation(format!("{field} '{value}' already exists"))
            }
            other => {
                tracing::error!(error = %other, "Unexpected database error");
                ApiError::internal()
            }
        }
    }
}

/// Converts booking-transaction failures to API errors.
///
/// A range conflict is a business-rule rejection, never a server error.
impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::DatesUnavailable => ApiError::business(err.to_string()),
            BookingError::Db(e) => e.into(),
        }
    }
}

/// Converts cancellation failures to API errors.
impl From<CancelError> for ApiError {
    fn from(err: CancelError) -> Self {
        match err {
            CancelError::NotConfirmed => ApiError::business(err.to_string()),
            CancelError::Db(e) => e.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorCode::Unauthenticated.http_status(), 401);
        assert_eq!(ErrorCode::Forbidden.http_status(), 403);
        assert_eq!(ErrorCode::NotFound.http_status(), 404);
        assert_eq!(ErrorCode::Validation.http_status(), 400);
        assert_eq!(ErrorCode::BusinessRule.http_status(), 400);
        assert_eq!(ErrorCode::Internal.http_status(), 500);
    }

    #[test]
    fn test_business_rejections_keep_their_message() {
        let err: ApiError = CoreError::StayTooShort { min_days: 2 }.into();
        assert_eq!(err.code, ErrorCode::BusinessRule);
        assert_eq!(err.message, "The minimum stay for this property is 2 day(s).");
    }

    #[test]
    fn test_conflict_is_business_rule_not_internal() {
        let err: ApiError = BookingError::DatesUnavailable.into();
        assert_eq!(err.code, ErrorCode::BusinessRule);
        assert_eq!(err.code.http_status(), 400);
    }

    #[test]
    fn test_unexpected_db_error_hides_detail() {
        let err: ApiError = DbError::QueryFailed("secret table is broken".to_string()).into();
        assert_eq!(err.code, ErrorCode::Internal);
        assert!(!err.message.contains("secret"));
    }

    #[test]
    fn test_serializes_with_screaming_snake_code() {
        let err = ApiError::validation("guestCount must be greater than zero");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"VALIDATION\""));
    }
}
