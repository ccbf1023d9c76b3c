//! # Property Operations
//!
//! The create-property operation: registers a property and seeds its
//! creator as master owner in one atomic unit.
//!
//! ## Seeding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  identity + CreatePropertyRequest                                       │
//! │       │                                                                 │
//! │       ├── field validation (name, fractions, bounds, caps, value)      │
//! │       ├── fraction math (quota-core::fraction)                         │
//! │       │     per_fraction_days = 365 / total_fractions                  │
//! │       │     current pool      = annual * days-left-in-year share       │
//! │       │     next pool         = full annual total                      │
//! │       ├── property + master link, one transaction (quota-db)           │
//! │       ├── fire-and-forget notification                                 │
//! │       ▼                                                                 │
//! │  CreatedProperty { id, name, kind, registered_at }                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use quota_core::{
    fraction, validation, MemberIdentity, MemberLink, MemberRole, Property, PropertyKind,
    DEFAULT_FRACTIONS, DEFAULT_MAX_STAY_DAYS, DEFAULT_MIN_STAY_DAYS,
};

use crate::error::ApiError;
use crate::identity::require_member;
use crate::notify::{dispatch, NewNotification};
use crate::QuotaService;

// =============================================================================
// Request / Response DTOs
// =============================================================================

/// Input of the create-property operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    /// Display name, 1..=100 characters.
    pub name: String,

    /// Property kind.
    pub kind: PropertyKind,

    /// Ownership split, 1..=52. Defaults to 52.
    pub total_fractions: Option<u32>,

    /// Minimum stay in whole days. Defaults to 1.
    pub min_stay_days: Option<i64>,

    /// Maximum stay in whole days. Defaults to 30.
    pub max_stay_days: Option<i64>,

    /// Cap on a member's upcoming confirmed reservations.
    pub active_reservation_cap: Option<i64>,

    /// Cap on holiday dates a member may occupy per year.
    pub holiday_cap_per_member: Option<i64>,

    pub address_postcode: Option<String>,
    pub address_city: Option<String>,
    pub address_district: Option<String>,
    pub address_street: Option<String>,
    pub address_number: Option<String>,
    pub address_complement: Option<String>,
    pub address_reference: Option<String>,

    /// Estimated market value in cents.
    pub estimated_value_cents: Option<i64>,
}

/// Output of the create-property operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedProperty {
    pub id: String,
    pub name: String,
    pub kind: PropertyKind,
    pub registered_at: DateTime<Utc>,
}

// =============================================================================
// Operation
// =============================================================================

impl QuotaService {
    /// Registers a property and links its creator as master owner.
    ///
    /// The creator receives every fraction, a pro-rata current-year pool
    /// and a full next-year pool. Property and link land in one
    /// transaction; a property can never exist without its master owner.
    pub async fn create_property(
        &self,
        identity: Option<&MemberIdentity>,
        request: CreatePropertyRequest,
    ) -> Result<CreatedProperty, ApiError> {
        let member = require_member(identity)?;

        let name = validation::validate_property_name(&request.name)?;
        let total_fractions = request.total_fractions.unwrap_or(DEFAULT_FRACTIONS);
        validation::validate_total_fractions(total_fractions)?;

        let min_stay_days = request.min_stay_days.unwrap_or(DEFAULT_MIN_STAY_DAYS);
        let max_stay_days = request.max_stay_days.unwrap_or(DEFAULT_MAX_STAY_DAYS);
        validation::validate_stay_bounds(min_stay_days, max_stay_days)?;

        validation::validate_cap("activeReservationCap", request.active_reservation_cap)?;
        validation::validate_cap("holidayCapPerMember", request.holiday_cap_per_member)?;
        validation::validate_estimated_value_cents(request.estimated_value_cents)?;

        let now = Utc::now();
        let seeded = fraction::seed_balances(total_fractions, now.date_naive())?;

        let property = Property {
            id: Uuid::new_v4().to_string(),
            name: name.clone(),
            kind: request.kind,
            total_fractions,
            per_fraction_days: seeded.per_fraction_days,
            min_stay_days,
            max_stay_days,
            active_reservation_cap: request.active_reservation_cap,
            holiday_cap_per_member: request.holiday_cap_per_member,
            address_postcode: request.address_postcode,
            address_city: request.address_city,
            address_district: request.address_district,
            address_street: request.address_street,
            address_number: request.address_number,
            address_complement: request.address_complement,
            address_reference: request.address_reference,
            estimated_value_cents: request.estimated_value_cents,
            registered_at: now,
            updated_at: now,
        };

        let link = MemberLink {
            id: Uuid::new_v4().to_string(),
            property_id: property.id.clone(),
            member_id: member.member_id.clone(),
            role: MemberRole::MasterOwner,
            fractions: total_fractions,
            current_year_days: seeded.current_year_days,
            next_year_days: seeded.next_year_days,
            created_at: now,
            updated_at: now,
        };

        self.db().properties().create_with_master(&property, &link).await?;

        info!(
            property_id = %property.id,
            member_id = %member.member_id,
            total_fractions,
            "Property created"
        );

        dispatch(
            self.notifier(),
            NewNotification {
                property_id: property.id.clone(),
                author_id: member.member_id.clone(),
                message: format!(
                    "The property '{}' was registered by '{}'.",
                    property.name, member.display_name
                ),
            },
        );

        Ok(CreatedProperty {
            id: property.id,
            name: property.name,
            kind: property.kind,
            registered_at: property.registered_at,
        })
    }
}

// =============================================================================
// Integration Tests
// =============================================================================
