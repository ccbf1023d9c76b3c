//! # Reservation Operations
//!
//! The create-reservation and cancel-reservation operations exposed to
//! the transport layer.
//!
//! ## Create-Reservation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  identity + CreateReservationRequest                                    │
//! │       │                                                                 │
//! │       ├── field validation (UUID, guest count, RFC 3339 dates)         │
//! │       ├── admission pipeline (admission.rs)                            │
//! │       ├── booking transaction (quota-db, atomic)                       │
//! │       ├── fire-and-forget notification                                 │
//! │       ▼                                                                 │
//! │  Reservation (confirmed)                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cancellation mirrors booking: status flip plus a symmetric refund of
//! the debited pool, inside one transaction. The refund pool is chosen
//! by the same year rule evaluated at cancellation time; a stay whose
//! start year has already passed refunds the current-year pool.

use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use quota_core::{quota, validation, MemberIdentity, QuotaPool, Reservation, ReservationStatus, ValidationError};

use crate::admission;
use crate::error::ApiError;
use crate::identity::require_member;
use crate::notify::{dispatch, NewNotification};
use crate::QuotaService;

// =============================================================================
// Request DTOs
// =============================================================================

/// Input of the create-reservation operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    /// Property to book on.
    pub property_id: String,

    /// Stay start, RFC 3339.
    pub start: String,

    /// Stay end (exclusive), RFC 3339.
    pub end: String,

    /// Number of guests, at least 1.
    pub guest_count: i64,
}

/// Parses an RFC 3339 timestamp request field.
fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            ValidationError::InvalidFormat {
                field: field.to_string(),
                reason: "must be an RFC 3339 timestamp".to_string(),
            }
            .into()
        })
}

// =============================================================================
// Operations
// =============================================================================

impl QuotaService {
    /// Creates a reservation for the authenticated member.
    ///
    /// Runs the admission pipeline and, if admitted, the atomic booking
    /// transaction. On success the member's pool was debited by exactly
    /// the stay's duration and a notification was dispatched.
    pub async fn create_reservation(
        &self,
        identity: Option<&MemberIdentity>,
        request: CreateReservationRequest,
    ) -> Result<Reservation, ApiError> {
        let member = require_member(identity)?;

        validation::validate_uuid("propertyId", &request.property_id)?;
        validation::validate_guest_count(request.guest_count)?;
        let start_at = parse_timestamp("start", &request.start)?;
        let end_at = parse_timestamp("end", &request.end)?;

        let now = Utc::now();
        let admitted = admission::admit(
            self.db(),
            self.holidays(),
            member,
            &request.property_id,
            start_at,
            end_at,
            now,
        )
        .await?;

        let reservation = Reservation {
            id: Uuid::new_v4().to_string(),
            property_id: request.property_id.clone(),
            member_id: member.member_id.clone(),
            start_at,
            end_at,
            guest_count: request.guest_count,
            status: ReservationStatus::Confirmed,
            created_at: now,
            updated_at: now,
        };

        self.db()
            .reservations()
            .book(
                &reservation,
                &admitted.link.id,
                admitted.pool,
                admitted.duration_days,
            )
            .await?;

        info!(
            reservation_id = %reservation.id,
            property_id = %reservation.property_id,
            member_id = %member.member_id,
            days = admitted.duration_days,
            "Reservation created"
        );

        dispatch(
            self.notifier(),
            NewNotification {
                property_id: reservation.property_id.clone(),
                author_id: member.member_id.clone(),
                message: format!(
                    "Member '{}' booked a stay at '{}' from {} to {}.",
                    member.display_name,
                    admitted.property.name,
                    start_at.format("%Y-%m-%d"),
                    end_at.format("%Y-%m-%d"),
                ),
            },
        );

        Ok(reservation)
    }

    /// Cancels one of the authenticated member's reservations.
    ///
    /// Flips the status and refunds the debited days in one transaction.
    pub async fn cancel_reservation(
        &self,
        identity: Option<&MemberIdentity>,
        reservation_id: &str,
    ) -> Result<Reservation, ApiError> {
        let member = require_member(identity)?;
        validation::validate_uuid("reservationId", reservation_id)?;

        let reservation = self
            .db()
            .reservations()
            .get_by_id(reservation_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Reservation", reservation_id))?;

        if reservation.member_id != member.member_id {
            return Err(ApiError::forbidden(
                "You can only cancel your own reservations.",
            ));
        }

        let link = self
            .db()
            .members()
            .find_link(&member.member_id, &reservation.property_id)
            .await?
            .ok_or_else(|| {
                ApiError::forbidden("Access denied. You are not a member of this property.")
            })?;

        let now = Utc::now();
        // Refund symmetrically to the debit rule. A start year already in
        // the past falls back to the current-year pool.
        let pool = quota::select_pool(reservation.start_at.year(), now.year())
            .unwrap_or(QuotaPool::CurrentYear);
        let refund_days = reservation.duration_days();

        let cancelled = self
            .db()
            .reservations()
            .cancel(&reservation.id, &link.id, pool, refund_days, now)
            .await?;

        info!(
            reservation_id = %cancelled.id,
            property_id = %cancelled.property_id,
            member_id = %member.member_id,
            days = refund_days,
            "Reservation cancelled"
        );

        dispatch(
            self.notifier(),
            NewNotification {
                property_id: cancelled.property_id.clone(),
                author_id: member.member_id.clone(),
                message: format!(
                    "Member '{}' cancelled a reservation from {} to {}.",
                    member.display_name,
                    cancelled.start_at.format("%Y-%m-%d"),
                    cancelled.end_at.format("%Y-%m-%d"),
                ),
            },
        );

        Ok(cancelled)
    }
}

// =============================================================================
// Integration Tests
// =============================================================================
