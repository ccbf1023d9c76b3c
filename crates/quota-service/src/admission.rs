//! # Reservation Admission Engine
//!
//! Runs the ordered validation pipeline against a proposed reservation.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Admission Pipeline (short-circuits)                    │
//! │                                                                         │
//! │  1. Membership       member holds a link to the property    (403)     │
//! │  2. Range sanity     end > start, start not in the past     (400)     │
//! │  3. Duration bounds  min_stay ≤ days ≤ max_stay             (400)     │
//! │  4. Quota            pool by start year, balance ≥ days     (400)     │
//! │  5. Active cap       upcoming confirmed stays below cap     (400)     │
//! │  6. Holiday cap      holidays used + requested within cap   (400)     │
//! │                                                                         │
//! │  Every failure carries its own message; there is no catch-all.         │
//! │  All reads here are committed-state reads and advisory only; the       │
//! │  booking transaction re-checks range conflicts under the write lock.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::{debug, warn};

use quota_core::rules;
use quota_core::{quota, MemberIdentity, MemberLink, Property, QuotaPool};
use quota_db::Database;

use crate::error::ApiError;
use crate::holidays::HolidaySource;

/// A reservation request that passed every admission check.
///
/// Everything the booking transaction needs: the resolved link, the
/// selected pool and the computed duration.
#[derive(Debug)]
pub struct AdmittedBooking {
    pub property: Property,
    pub link: MemberLink,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub duration_days: i64,
    pub pool: QuotaPool,
}

/// Runs the admission pipeline for one proposed reservation.
pub async fn admit(
    db: &Database,
    holidays: &dyn HolidaySource,
    member: &MemberIdentity,
    property_id: &str,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<AdmittedBooking, ApiError> {
    // 1. Membership. No link, no business on this property.
    let link = db
        .members()
        .find_link(&member.member_id, property_id)
        .await?
        .ok_or_else(|| {
            ApiError::forbidden("Access denied. You are not a member of this property.")
        })?;

    let property = db
        .properties()
        .get_by_id(property_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Property", property_id))?;

    // 2. Range sanity.
    let duration_days = quota::stay_duration_days(start_at, end_at)?;
    rules::check_start_not_past(start_at, now)?;

    // 3. Duration bounds.
    rules::check_duration_bounds(duration_days, property.min_stay_days, property.max_stay_days)?;

    // 4. Quota sufficiency, against the pool the stay's start year selects.
    //
    // This read is advisory: the booking transaction debits without
    // re-validating, so concurrent non-overlapping bookings on the same
    // link can jointly overdraw a pool. Accepted behavior.
    let stay_year = start_at.year();
    let pool = quota::select_pool(stay_year, now.year())?;
    rules::check_balance(link.balance(pool), duration_days, stay_year)?;

    // 5. Active-reservation cap, when the property configures one.
    if property.active_reservation_cap.is_some() {
        let active = db
            .reservations()
            .count_active_from(&member.member_id, property_id, now)
            .await?;
        rules::check_active_reservation_cap(active, property.active_reservation_cap)?;
    }

    // 6. Holiday cap, when the property configures a positive one.
    if let Some(limit) = property.holiday_cap_per_member.filter(|limit| *limit > 0) {
        let all_holidays =
            gather_holidays(holidays, start_at.year(), end_at.year()).await;
        let new_usage = rules::count_holidays_within(all_holidays.iter(), start_at, end_at);

        if new_usage > 0 {
            let others = db
                .reservations()
                .list_confirmed_for_member(&member.member_id, property_id)
                .await?;
            let existing_usage: usize = others
                .iter()
                .map(|r| rules::count_holidays_within(all_holidays.iter(), r.start_at, r.end_at))
                .sum();

            rules::check_holiday_cap(existing_usage, new_usage, limit)?;
        }
    }

    debug!(
        member_id = %member.member_id,
        property_id = %property_id,
        days = duration_days,
        "Reservation admitted"
    );

    Ok(AdmittedBooking {
        property,
        link,
        start_at,
        end_at,
        duration_days,
        pool,
    })
}

/// Fetches holidays for every distinct year the stay spans, fail-open.
///
/// A lookup failure degrades to "no holidays that year" after a warn;
/// third-party availability never blocks a booking.
async fn gather_holidays(
    holidays: &dyn HolidaySource,
    start_year: i32,
    end_year: i32,
) -> HashSet<NaiveDate> {
    let years: BTreeSet<i32> = [start_year, end_year].into_iter().collect();

    let mut all = HashSet::new();
    for year in years {
        match holidays.holidays_for_year(year).await {
            Ok(dates) => all.extend(dates),
            Err(err) => {
                warn!(year, error = %err, "Holiday lookup failed, treating year as holiday-free");
            }
        }
    }
    all
}
