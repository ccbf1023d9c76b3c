//! # Error Types
//!
//! Domain-specific error types for quota-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quota-core errors (this file)                                         │
//! │  ├── CoreError        - Business-rule rejections                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quota-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  quota-service errors (separate crate)                                 │
//! │  └── ApiError         - What the transport layer sees                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every admission rule has its own variant so rejections stay distinct
//! 3. Each variant's message is the user-facing message, verbatim

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business-rule rejections raised by the admission rules and quota math.
///
/// Each variant carries the context needed to render its user-facing
/// message; there is no generic catch-all.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested range is empty or inverted.
    #[error("The end date must be after the start date.")]
    EndNotAfterStart,

    /// The requested stay starts before today.
    #[error("Reservations cannot start on a past date.")]
    StartInPast,

    /// Stay shorter than the property's minimum.
    #[error("The minimum stay for this property is {min_days} day(s).")]
    StayTooShort { min_days: i64 },

    /// Stay longer than the property's maximum.
    #[error("The maximum stay for this property is {max_days} day(s).")]
    StayTooLong { max_days: i64 },

    /// Stays can only target the current or the next calendar year.
    #[error("Reservations cannot be created for the year {year}.")]
    YearNotBookable { year: i32 },

    /// The selected pool does not hold enough stay-days.
    ///
    /// ## When This Occurs
    /// - The member already spent this year's allotment
    /// - The stay is longer than what is left in the pool
    #[error(
        "Your {requested_days}-day reservation for {year} exceeds your balance of {} day(s) for that year.",
        .available_days.floor()
    )]
    InsufficientBalance {
        requested_days: i64,
        year: i32,
        available_days: f64,
    },

    /// The member already holds the configured number of upcoming reservations.
    #[error("The limit of {limit} active reservation(s) has been reached.")]
    ActiveReservationLimit { limit: i64 },

    /// Booking the range would exceed the member's holiday allowance.
    #[error("The limit of {limit} holiday(s) per member has been reached.")]
    HolidayLimit { limit: i64 },

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request fields don't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientBalance {
            requested_days: 6,
            year: 2026,
            available_days: 5.7,
        };
        assert_eq!(
            err.to_string(),
            "Your 6-day reservation for 2026 exceeds your balance of 5 day(s) for that year."
        );

        let err = CoreError::StayTooShort { min_days: 2 };
        assert_eq!(err.to_string(), "The minimum stay for this property is 2 day(s).");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "totalFractions".to_string(),
            min: 1,
            max: 52,
        };
        assert_eq!(err.to_string(), "totalFractions must be between 1 and 52");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
