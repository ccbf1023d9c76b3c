//! # Validation Module
//!
//! Input validation for request fields, run before any business rule.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Transport (embedding application)                            │
//! │  ├── Deserialization and type checks                                   │
//! │  └── Immediate caller feedback                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - field validation                               │
//! │  ├── Presence, length, range                                           │
//! │  └── Field-specific messages, surfaced as 400-class errors             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE and foreign key constraints                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::{MAX_FRACTIONS, MIN_FRACTIONS};

/// Validates a property display name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 100 characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_property_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(name.to_string())
}

/// Validates a fraction count (1..=52).
pub fn validate_total_fractions(total_fractions: u32) -> ValidationResult<()> {
    if !(MIN_FRACTIONS..=MAX_FRACTIONS).contains(&total_fractions) {
        return Err(ValidationError::OutOfRange {
            field: "totalFractions".to_string(),
            min: MIN_FRACTIONS as i64,
            max: MAX_FRACTIONS as i64,
        });
    }
    Ok(())
}

/// Validates stay-duration bounds.
///
/// ## Rules
/// - Minimum must be at least 1 day
/// - Maximum must not be below the minimum
pub fn validate_stay_bounds(min_days: i64, max_days: i64) -> ValidationResult<()> {
    if min_days < 1 {
        return Err(ValidationError::MustBePositive {
            field: "minStayDays".to_string(),
        });
    }
    if max_days < min_days {
        return Err(ValidationError::OutOfRange {
            field: "maxStayDays".to_string(),
            min: min_days,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a guest count.
pub fn validate_guest_count(guest_count: i64) -> ValidationResult<()> {
    if guest_count <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "guestCount".to_string(),
        });
    }
    Ok(())
}

/// Validates an optional per-member cap (active reservations, holidays).
pub fn validate_cap(field: &str, cap: Option<i64>) -> ValidationResult<()> {
    if let Some(value) = cap {
        if value <= 0 {
            return Err(ValidationError::MustBePositive {
                field: field.to_string(),
            });
        }
    }
    Ok(())
}

/// Validates an optional estimated value in cents.
pub fn validate_estimated_value_cents(cents: Option<i64>) -> ValidationResult<()> {
    if let Some(value) = cents {
        if value <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "estimatedValue".to_string(),
            });
        }
    }
    Ok(())
}

/// Validates a UUID string format.
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
