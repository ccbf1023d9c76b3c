//! # Domain Types
//!
//! Core domain types used throughout Quota Stay.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Property     │   │   MemberLink    │   │   Reservation   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  total_fractions│◄──│  property_id    │◄──│  property_id    │       │
//! │  │  stay bounds    │   │  member_id      │   │  member_id      │       │
//! │  │  per-member caps│   │  two day pools  │   │  start/end      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  PropertyKind   │   │   MemberRole    │   │ReservationStatus│       │
//! │  │  House          │   │  MasterOwner    │   │  Confirmed      │       │
//! │  │  Apartment ...  │   │  CoOwner        │   │  Cancelled      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `MemberLink` ties one member to one property and is unique per pair.
//! Both `MemberLink` and `Reservation` belong to their `Property`; a
//! reservation also references its member's link through `member_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quota::QuotaPool;

// =============================================================================
// Property
// =============================================================================

/// The kind of real estate a property is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
pub enum PropertyKind {
    House,
    Apartment,
    Farmhouse,
    Lot,
    Other,
}

/// A co-owned property whose occupancy is split into fractions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to members and in notifications.
    pub name: String,

    /// Property kind.
    pub kind: PropertyKind,

    /// How many ownership fractions the property is split into (1..=52).
    pub total_fractions: u32,

    /// Stay-days one fraction grants per year (`365 / total_fractions`).
    pub per_fraction_days: f64,

    /// Minimum stay duration in whole days.
    pub min_stay_days: i64,

    /// Maximum stay duration in whole days.
    pub max_stay_days: i64,

    /// Cap on a member's upcoming confirmed reservations. `None` = no cap.
    pub active_reservation_cap: Option<i64>,

    /// Cap on public-holiday dates a member may occupy per year. `None` = no cap.
    pub holiday_cap_per_member: Option<i64>,

    pub address_postcode: Option<String>,
    pub address_city: Option<String>,
    pub address_district: Option<String>,
    pub address_street: Option<String>,
    pub address_number: Option<String>,
    pub address_complement: Option<String>,
    pub address_reference: Option<String>,

    /// Estimated market value in cents (smallest currency unit).
    pub estimated_value_cents: Option<i64>,

    /// When the property was registered.
    pub registered_at: DateTime<Utc>,

    /// When the property was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Member Link
// =============================================================================

/// A member's role on a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// The registering owner. Holds every fraction at creation time.
    MasterOwner,
    /// Any other fraction holder.
    CoOwner,
}

/// The link between a member and a property.
///
/// Carries the member's fraction count and the two stay-day pools the
/// member spends when booking. Created when a member joins a property
/// (property creation seeds the creator's link), debited by every
/// successful booking, and credited back on cancellation. Both balances
/// are non-negative at rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct MemberLink {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Property this link belongs to.
    pub property_id: String,

    /// Member identity, as issued by the identity provider.
    pub member_id: String,

    /// Role on the property.
    pub role: MemberRole,

    /// Number of ownership fractions held.
    pub fractions: u32,

    /// Stay-days left for the current calendar year.
    pub current_year_days: f64,

    /// Stay-days left for the next calendar year.
    pub next_year_days: f64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MemberLink {
    /// Returns the balance of the given pool.
    #[inline]
    pub fn balance(&self, pool: QuotaPool) -> f64 {
        match pool {
            QuotaPool::CurrentYear => self.current_year_days,
            QuotaPool::NextYear => self.next_year_days,
        }
    }
}

// =============================================================================
// Reservation
// =============================================================================

/// The status of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Booked and occupying its date range.
    Confirmed,
    /// Released; no longer blocks the range and its days were refunded.
    Cancelled,
}

/// A member's stay on a property.
///
/// The range is half-open: `end_at` is exclusive, so two reservations
/// conflict iff `start_a < end_b && start_b < end_a`. While confirmed, a
/// reservation never overlaps another confirmed reservation on the same
/// property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Property the stay is on.
    pub property_id: String,

    /// Member who booked the stay.
    pub member_id: String,

    /// First occupied instant.
    pub start_at: DateTime<Utc>,

    /// First instant no longer occupied (exclusive).
    pub end_at: DateTime<Utc>,

    /// Number of guests staying.
    pub guest_count: i64,

    /// Reservation status.
    pub status: ReservationStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Whole-day duration of the stay.
    #[inline]
    pub fn duration_days(&self) -> i64 {
        (self.end_at - self.start_at).num_days()
    }
}

// =============================================================================
// Member Identity
// =============================================================================

/// The authenticated member behind a request.
///
/// Produced by the identity provider in front of this system; consumed
/// here as an opaque input. A request without one is rejected as
/// unauthenticated, never processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberIdentity {
    /// Stable member identifier.
    pub member_id: String,

    /// Display name, used in notification messages.
    pub display_name: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
