//! # Reservation Repository
//!
//! Database operations for reservations, including the one strictly
//! consistent operation in the system: the atomic booking transaction.
//!
//! ## Booking Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     book() - one atomic unit                            │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    1. UPDATE member_links ... (debit the selected pool)                │
//! │       └── the write takes SQLite's write lock up front, so the         │
//! │           conflict scan below is serialized against concurrent         │
//! │           bookings; a competing transaction queues on the lock and     │
//! │           then sees this one's committed reservation                   │
//! │    2. SELECT id FROM reservations WHERE <ranges overlap> LIMIT 1       │
//! │       └── any hit: ROLLBACK (debit undone), DatesUnavailable           │
//! │    3. INSERT INTO reservations (status = confirmed)                    │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  The debit and the insert can never apply separately; any failure      │
//! │  rolls the whole unit back.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cancellation mirrors the same shape: status flip + pool refund in one
//! transaction.

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::debug;

use crate::error::{DbError, DbResult};
use quota_core::{QuotaPool, Reservation};

/// Every column of `reservations`, in insert order.
const RESERVATION_COLUMNS: &str = "id, property_id, member_id, start_at, end_at, \
     guest_count, status, created_at, updated_at";

// =============================================================================
// Outcome Errors
// =============================================================================

/// Failure modes of the booking transaction.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Another confirmed reservation occupies part of the range.
    #[error("The selected dates are already booked.")]
    DatesUnavailable,

    /// Storage failure.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Failure modes of reservation cancellation.
#[derive(Debug, Error)]
pub enum CancelError {
    /// Only confirmed reservations can be cancelled.
    #[error("Only confirmed reservations can be cancelled.")]
    NotConfirmed,

    /// Storage failure.
    #[error(transparent)]
    Db(#[from] DbError),
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for reservation database operations.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    /// Creates a new ReservationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReservationRepository { pool }
    }

    /// Gets a reservation by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1");
        let reservation = sqlx::query_as::<_, Reservation>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(reservation)
    }

    /// Counts a member's confirmed reservations starting at or after `from`.
    ///
    /// Feeds the active-reservation cap check.
    pub async fn count_active_from(
        &self,
        member_id: &str,
        property_id: &str,
        from: chrono::DateTime<chrono::Utc>,
    ) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations \
             WHERE member_id = ?1 AND property_id = ?2 \
               AND status = 'confirmed' AND start_at >= ?3",
        )
        .bind(member_id)
        .bind(property_id)
        .bind(from)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Lists a member's confirmed reservations on a property.
    ///
    /// Feeds the holiday-usage recount.
    pub async fn list_confirmed_for_member(
        &self,
        member_id: &str,
        property_id: &str,
    ) -> DbResult<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE member_id = ?1 AND property_id = ?2 AND status = 'confirmed' \
             ORDER BY start_at"
        );
        let reservations = sqlx::query_as::<_, Reservation>(&sql)
            .bind(member_id)
            .bind(property_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(reservations)
    }

    /// Books a reservation: conflict re-check + insert + pool debit, atomically.
    ///
    /// ## Arguments
    /// * `reservation` - Complete confirmed reservation row to insert
    /// * `link_id` - The member link whose pool is debited
    /// * `pool` - Which day pool the stay draws from
    /// * `duration_days` - Whole days to debit
    ///
    /// ## Returns
    /// * `Err(BookingError::DatesUnavailable)` - another confirmed
    ///   reservation overlaps the range; nothing was written
    pub async fn book(
        &self,
        reservation: &Reservation,
        link_id: &str,
        pool: QuotaPool,
        duration_days: i64,
    ) -> Result<(), BookingError> {
        debug!(
            id = %reservation.id,
            property_id = %reservation.property_id,
            days = duration_days,
            "Booking reservation"
        );

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        // Debit first. The UPDATE takes the write lock before the conflict
        // scan runs, serializing this transaction against concurrent
        // bookings on the same database.
        let debit_sql = match pool {
            QuotaPool::CurrentYear => {
                "UPDATE member_links \
                 SET current_year_days = current_year_days - ?1, updated_at = ?2 \
                 WHERE id = ?3"
            }
            QuotaPool::NextYear => {
                "UPDATE member_links \
                 SET next_year_days = next_year_days - ?1, updated_at = ?2 \
                 WHERE id = ?3"
            }
        };
        let debited = sqlx::query(debit_sql)
            .bind(duration_days as f64)
            .bind(reservation.updated_at)
            .bind(link_id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        if debited.rows_affected() == 0 {
            tx.rollback().await.map_err(DbError::from)?;
            return Err(DbError::not_found("MemberLink", link_id).into());
        }

        // Conflict re-check against every non-cancelled reservation on the
        // property. Half-open semantics: existing.start < new.end AND
        // existing.end > new.start.
        let conflict: Option<String> = sqlx::query_scalar(
            "SELECT id FROM reservations \
             WHERE property_id = ?1 AND status != 'cancelled' \
               AND start_at < ?2 AND end_at > ?3 \
             LIMIT 1",
        )
        .bind(&reservation.property_id)
        .bind(reservation.end_at)
        .bind(reservation.start_at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(DbError::from)?;

        if let Some(conflicting_id) = conflict {
            debug!(
                id = %reservation.id,
                conflicting_id = %conflicting_id,
                "Range conflict, rolling back"
            );
            tx.rollback().await.map_err(DbError::from)?;
            return Err(BookingError::DatesUnavailable);
        }

        let sql = format!(
            "INSERT INTO reservations ({RESERVATION_COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
        );
        sqlx::query(&sql)
            .bind(&reservation.id)
            .bind(&reservation.property_id)
            .bind(&reservation.member_id)
            .bind(reservation.start_at)
            .bind(reservation.end_at)
            .bind(reservation.guest_count)
            .bind(reservation.status)
            .bind(reservation.created_at)
            .bind(reservation.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        tx.commit().await.map_err(DbError::from)?;

        debug!(id = %reservation.id, "Reservation booked");
        Ok(())
    }

    /// Cancels a confirmed reservation and refunds its days, atomically.
    ///
    /// ## Arguments
    /// * `reservation_id` - Reservation to cancel
    /// * `link_id` - The member link whose pool is credited back
    /// * `pool` - Which day pool receives the refund
    /// * `refund_days` - Whole days to credit
    ///
    /// ## Returns
    /// The reservation as stored after the status flip.
    pub async fn cancel(
        &self,
        reservation_id: &str,
        link_id: &str,
        pool: QuotaPool,
        refund_days: i64,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Reservation, CancelError> {
        debug!(id = %reservation_id, days = refund_days, "Cancelling reservation");

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let updated = sqlx::query(
            "UPDATE reservations SET status = 'cancelled', updated_at = ?2 \
             WHERE id = ?1 AND status = 'confirmed'",
        )
        .bind(reservation_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        if updated.rows_affected() == 0 {
            // Distinguish a missing reservation from a non-confirmed one.
            let exists: Option<String> =
                sqlx::query_scalar("SELECT id FROM reservations WHERE id = ?1")
                    .bind(reservation_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(DbError::from)?;

            tx.rollback().await.map_err(DbError::from)?;
            return Err(if exists.is_some() {
                CancelError::NotConfirmed
            } else {
                DbError::not_found("Reservation", reservation_id).into()
            });
        }

        let refund_sql = match pool {
            QuotaPool::CurrentYear => {
                "UPDATE member_links \
                 SET current_year_days = current_year_days + ?1, updated_at = ?2 \
                 WHERE id = ?3"
            }
            QuotaPool::NextYear => {
                "UPDATE member_links \
                 SET next_year_days = next_year_days + ?1, updated_at = ?2 \
                 WHERE id = ?3"
            }
        };
        let refunded = sqlx::query(refund_sql)
            .bind(refund_days as f64)
            .bind(now)
            .bind(link_id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        if refunded.rows_affected() == 0 {
            tx.rollback().await.map_err(DbError::from)?;
            return Err(DbError::not_found("MemberLink", link_id).into());
        }

        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1");
        let reservation = sqlx::query_as::<_, Reservation>(&sql)
            .bind(reservation_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(DbError::from)?;

        tx.commit().await.map_err(DbError::from)?;

        debug!(id = %reservation_id, "Reservation cancelled");
        Ok(reservation)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{DateTime, TimeZone, Utc};
    use quota_core::{MemberLink, MemberRole, Property, PropertyKind, ReservationStatus};
    use uuid::Uuid;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 14, 0, 0).unwrap()
    }

    fn test_property(now: DateTime<Utc>) -> Property {
        Property {
            id: Uuid::new_v4().to_string(),
            name: "Beach House".to_string(),
            kind: PropertyKind::House,
            total_fractions: 52,
            per_fraction_days: 365.0 / 52.0,
            min_stay_days: 1,
            max_stay_days: 30,
            active_reservation_cap: None,
            holiday_cap_per_member: None,
            address_postcode: None,
            address_city: None,
            address_district: None,
            address_street: None,
            address_number: None,
            address_complement: None,
            address_reference: None,
            estimated_value_cents: None,
            registered_at: now,
            updated_at: now,
        }
    }

    fn test_link(property_id: &str, member_id: &str, now: DateTime<Utc>) -> MemberLink {
        MemberLink {
            id: Uuid::new_v4().to_string(),
            property_id: property_id.to_string(),
            member_id: member_id.to_string(),
            role: MemberRole::MasterOwner,
            fractions: 52,
            current_year_days: 100.0,
            next_year_days: 365.0,
            created_at: now,
            updated_at: now,
        }
    }

    fn test_reservation(
        property_id: &str,
        member_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Reservation {
        Reservation {
            id: Uuid::new_v4().to_string(),
            property_id: property_id.to_string(),
            member_id: member_id.to_string(),
            start_at: start,
            end_at: end,
            guest_count: 2,
            status: ReservationStatus::Confirmed,
            created_at: start,
            updated_at: start,
        }
    }

    async fn seeded_db() -> (Database, Property, MemberLink) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let now = at(2026, 1, 10);
        let property = test_property(now);
        let link = test_link(&property.id, "member-1", now);
        db.properties()
            .create_with_master(&property, &link)
            .await
            .unwrap();
        (db, property, link)
    }

    #[tokio::test]
    async fn test_book_inserts_and_debits() {
        let (db, property, link) = seeded_db().await;
        let reservation =
            test_reservation(&property.id, &link.member_id, at(2026, 7, 10), at(2026, 7, 15));

        db.reservations()
            .book(&reservation, &link.id, QuotaPool::CurrentYear, 5)
            .await
            .unwrap();

        let stored = db
            .reservations()
            .get_by_id(&reservation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, ReservationStatus::Confirmed);
        assert_eq!(stored.duration_days(), 5);

        let link = db.members().get_by_id(&link.id).await.unwrap().unwrap();
        assert!((link.current_year_days - 95.0).abs() < 1e-9);
        // The other pool is untouched.
        assert!((link.next_year_days - 365.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_book_rejects_overlap_and_rolls_back_debit() {
        let (db, property, link) = seeded_db().await;

        let first =
            test_reservation(&property.id, &link.member_id, at(2026, 7, 10), at(2026, 7, 15));
        db.reservations()
            .book(&first, &link.id, QuotaPool::CurrentYear, 5)
            .await
            .unwrap();

        let overlapping =
            test_reservation(&property.id, &link.member_id, at(2026, 7, 12), at(2026, 7, 20));
        let err = db
            .reservations()
            .book(&overlapping, &link.id, QuotaPool::CurrentYear, 8)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::DatesUnavailable));

        // The rejected booking must not have debited anything.
        let stored = db.members().get_by_id(&link.id).await.unwrap().unwrap();
        assert!((stored.current_year_days - 95.0).abs() < 1e-9);
        assert!(db
            .reservations()
            .get_by_id(&overlapping.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_back_to_back_stays_do_not_conflict() {
        let (db, property, link) = seeded_db().await;

        let first =
            test_reservation(&property.id, &link.member_id, at(2026, 7, 10), at(2026, 7, 15));
        db.reservations()
            .book(&first, &link.id, QuotaPool::CurrentYear, 5)
            .await
            .unwrap();

        // Starts exactly where the first ends. Half-open ranges admit it.
        let second =
            test_reservation(&property.id, &link.member_id, at(2026, 7, 15), at(2026, 7, 18));
        db.reservations()
            .book(&second, &link.id, QuotaPool::CurrentYear, 3)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancel_refunds_and_releases_range() {
        let (db, property, link) = seeded_db().await;

        let reservation =
            test_reservation(&property.id, &link.member_id, at(2026, 7, 10), at(2026, 7, 15));
        db.reservations()
            .book(&reservation, &link.id, QuotaPool::CurrentYear, 5)
            .await
            .unwrap();

        let cancelled = db
            .reservations()
            .cancel(&reservation.id, &link.id, QuotaPool::CurrentYear, 5, at(2026, 2, 1))
            .await
            .unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);

        let stored = db.members().get_by_id(&link.id).await.unwrap().unwrap();
        assert!((stored.current_year_days - 100.0).abs() < 1e-9);

        // Cancelled reservations no longer block the range.
        let replacement =
            test_reservation(&property.id, &link.member_id, at(2026, 7, 11), at(2026, 7, 14));
        db.reservations()
            .book(&replacement, &link.id, QuotaPool::CurrentYear, 3)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancel_twice_is_rejected() {
        let (db, property, link) = seeded_db().await;

        let reservation =
            test_reservation(&property.id, &link.member_id, at(2026, 7, 10), at(2026, 7, 15));
        db.reservations()
            .book(&reservation, &link.id, QuotaPool::CurrentYear, 5)
            .await
            .unwrap();

        db.reservations()
            .cancel(&reservation.id, &link.id, QuotaPool::CurrentYear, 5, at(2026, 2, 1))
            .await
            .unwrap();

        let err = db
            .reservations()
            .cancel(&reservation.id, &link.id, QuotaPool::CurrentYear, 5, at(2026, 2, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, CancelError::NotConfirmed));
    }

    #[tokio::test]
    async fn test_count_active_from_ignores_past_and_cancelled() {
        let (db, property, link) = seeded_db().await;
        let repo = db.reservations();

        let past =
            test_reservation(&property.id, &link.member_id, at(2026, 2, 1), at(2026, 2, 5));
        repo.book(&past, &link.id, QuotaPool::CurrentYear, 4)
            .await
            .unwrap();

        let upcoming =
            test_reservation(&property.id, &link.member_id, at(2026, 8, 1), at(2026, 8, 5));
        repo.book(&upcoming, &link.id, QuotaPool::CurrentYear, 4)
            .await
            .unwrap();

        let cancelled =
            test_reservation(&property.id, &link.member_id, at(2026, 9, 1), at(2026, 9, 5));
        repo.book(&cancelled, &link.id, QuotaPool::CurrentYear, 4)
            .await
            .unwrap();
        repo.cancel(&cancelled.id, &link.id, QuotaPool::CurrentYear, 4, at(2026, 3, 1))
            .await
            .unwrap();

        let count = repo
            .count_active_from(&link.member_id, &property.id, at(2026, 6, 1))
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
