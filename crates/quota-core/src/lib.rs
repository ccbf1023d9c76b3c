//! # quota-core: Pure Business Logic for Quota Stay
//!
//! Quota Stay manages reservations on co-owned properties. Every member
//! holds a number of ownership fractions in a property and, with them, an
//! annual allotment of stay-days split into two pools: one for the current
//! calendar year and one for the next. Booking a date range spends days
//! from the pool that matches the stay's year.
//!
//! This crate is the **heart** of the system. It contains all business
//! rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Quota Stay Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  quota-service (orchestration)                  │   │
//! │  │   admission pipeline • holiday lookup • booking • notifications │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ quota-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   quota   │  │  fraction │  │   rules   │  │   │
//! │  │   │ Property  │  │ QuotaPool │  │  seeding  │  │ admission │  │   │
//! │  │   │ Reservat. │  │ selection │  │ pro-rata  │  │ predicates│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO CLOCK                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    quota-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Property, MemberLink, Reservation, ...)
//! - [`quota`] - Stay-day pools and pool selection by year
//! - [`fraction`] - Per-fraction entitlement and pro-rata seeding
//! - [`rules`] - The ordered admission predicates
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No Clock**: "today" and "now" are always parameters
//! 3. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fraction;
pub mod quota;
pub mod rules;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use quota_core::QuotaPool` instead of
// `use quota_core::quota::QuotaPool`

pub use error::{CoreError, CoreResult, ValidationError};
pub use fraction::{seed_balances, SeededBalances};
pub use quota::{select_pool, QuotaPool};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Days of entitlement a fully-owned property yields per year.
///
/// ## Why 365?
/// The annual allotment is defined as a fixed 365 stay-days regardless of
/// leap years. Pro-rata seeding accounts for the actual calendar length
/// separately (see [`fraction::seed_balances`]).
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Minimum number of ownership fractions a property can be split into.
pub const MIN_FRACTIONS: u32 = 1;

/// Maximum number of ownership fractions a property can be split into.
///
/// ## Business Reason
/// One fraction per week of the year. Finer splits would grant less than
/// a week of stay-days per fraction, which the product does not sell.
pub const MAX_FRACTIONS: u32 = 52;

/// Default fraction count for a newly registered property.
pub const DEFAULT_FRACTIONS: u32 = 52;

/// Default stay-duration bounds (whole days) for a new property.
pub const DEFAULT_MIN_STAY_DAYS: i64 = 1;
pub const DEFAULT_MAX_STAY_DAYS: i64 = 30;
