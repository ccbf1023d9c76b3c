//! # Admission Rules
//!
//! The business-rule checks a reservation request must pass before the
//! booking transaction runs.
//!
//! ## The Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Reservation Admission Pipeline                         │
//! │                                                                         │
//! │   request ──► membership (service) ──► range sanity ──► duration       │
//! │          ──► quota sufficiency ──► active-reservation cap              │
//! │          ──► holiday cap ──► booking transaction (quota-db)            │
//! │                                                                         │
//! │   Each rule is an independent predicate returning Ok or a distinct     │
//! │   CoreError; the pipeline short-circuits on the first rejection.       │
//! │   Everything up to the booking transaction reads committed state and   │
//! │   is advisory; only the transaction's overlap re-check is strict.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! These functions never touch a clock or a database. The orchestration
//! layer fetches state and passes it in, which keeps every rule testable
//! in isolation.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::error::{CoreError, CoreResult};

/// Start of the given instant's UTC day.
///
/// Used to normalize "today" before the past-date check so that a stay
/// starting later today is still bookable.
#[inline]
pub fn start_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// A stay must not start before today.
pub fn check_start_not_past(start: DateTime<Utc>, now: DateTime<Utc>) -> CoreResult<()> {
    if start < start_of_day(now) {
        return Err(CoreError::StartInPast);
    }
    Ok(())
}

/// A stay's whole-day duration must fall within the property's bounds.
pub fn check_duration_bounds(duration_days: i64, min_days: i64, max_days: i64) -> CoreResult<()> {
    if duration_days < min_days {
        return Err(CoreError::StayTooShort { min_days });
    }
    if duration_days > max_days {
        return Err(CoreError::StayTooLong { max_days });
    }
    Ok(())
}

/// The selected pool must hold at least the stay's duration.
pub fn check_balance(available_days: f64, duration_days: i64, stay_year: i32) -> CoreResult<()> {
    if available_days < duration_days as f64 {
        return Err(CoreError::InsufficientBalance {
            requested_days: duration_days,
            year: stay_year,
            available_days,
        });
    }
    Ok(())
}

/// The member must be below the property's active-reservation cap.
///
/// `active_count` is the member's confirmed reservations that have not
/// started yet. A property without a configured cap admits any count.
pub fn check_active_reservation_cap(active_count: i64, cap: Option<i64>) -> CoreResult<()> {
    if let Some(limit) = cap {
        if active_count >= limit {
            return Err(CoreError::ActiveReservationLimit { limit });
        }
    }
    Ok(())
}

/// Holiday usage across the member's stays must stay within the cap.
///
/// `existing` counts holidays inside the member's other confirmed
/// reservations on the property; `new` counts holidays inside the
/// requested range.
pub fn check_holiday_cap(existing: usize, new: usize, limit: i64) -> CoreResult<()> {
    if (existing + new) as i64 > limit {
        return Err(CoreError::HolidayLimit { limit });
    }
    Ok(())
}

// =============================================================================
// Holiday Interval Arithmetic
// =============================================================================

/// The instant a holiday date is tested against stay ranges.
///
/// Holidays are pinned to 12:00 UTC on their calendar date. Noon keeps a
/// holiday inside any stay that occupies that date regardless of the
/// stay's check-in/check-out times.
#[inline]
pub fn holiday_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc() + Duration::hours(12)
}

/// Counts holidays whose instant falls inside `[start, end]`.
///
/// Deliberately an inclusive interval, unlike the half-open overlap test
/// for reservations: a holiday on the checkout date still counts as
/// occupied for allowance purposes.
pub fn count_holidays_within<'a, I>(holidays: I, start: DateTime<Utc>, end: DateTime<Utc>) -> usize
where
    I: IntoIterator<Item = &'a NaiveDate>,
{
    holidays
        .into_iter()
        .map(|d| holiday_instant(*d))
        .filter(|instant| *instant >= start && *instant <= end)
        .count()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_start_not_past() {
        let now = at(2026, 7, 10, 15);

        // Later today is fine, even though it is before `now`.
        assert!(check_start_not_past(at(2026, 7, 10, 8), now).is_ok());
        assert!(check_start_not_past(at(2026, 8, 1, 0), now).is_ok());

        assert!(matches!(
            check_start_not_past(at(2026, 7, 9, 23), now),
            Err(CoreError::StartInPast)
        ));
    }

    #[test]
    fn test_duration_bounds() {
        assert!(check_duration_bounds(5, 2, 14).is_ok());
        assert!(check_duration_bounds(2, 2, 14).is_ok());
        assert!(check_duration_bounds(14, 2, 14).is_ok());

        assert!(matches!(
            check_duration_bounds(1, 2, 14),
            Err(CoreError::StayTooShort { min_days: 2 })
        ));
        assert!(matches!(
            check_duration_bounds(15, 2, 14),
            Err(CoreError::StayTooLong { max_days: 14 })
        ));
    }

    #[test]
    fn test_balance() {
        assert!(check_balance(10.0, 5, 2026).is_ok());
        assert!(check_balance(5.0, 5, 2026).is_ok());

        let err = check_balance(5.7, 6, 2026).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientBalance { .. }));
    }

    #[test]
    fn test_active_reservation_cap() {
        assert!(check_active_reservation_cap(99, None).is_ok());
        assert!(check_active_reservation_cap(1, Some(2)).is_ok());

        assert!(matches!(
            check_active_reservation_cap(2, Some(2)),
            Err(CoreError::ActiveReservationLimit { limit: 2 })
        ));
    }

    #[test]
    fn test_holiday_cap() {
        assert!(check_holiday_cap(0, 1, 1).is_ok());
        assert!(matches!(
            check_holiday_cap(1, 1, 1),
            Err(CoreError::HolidayLimit { limit: 1 })
        ));
        assert!(matches!(
            check_holiday_cap(0, 2, 1),
            Err(CoreError::HolidayLimit { limit: 1 })
        ));
    }

    #[test]
    fn test_holiday_instant_is_noon_utc() {
        let instant = holiday_instant(day(2026, 9, 7));
        assert_eq!(instant, at(2026, 9, 7, 12));
    }

    #[test]
    fn test_count_holidays_within_is_inclusive() {
        let holidays = [day(2026, 9, 7), day(2026, 9, 12), day(2026, 10, 12)];

        // Range covering the first two, checkout day included.
        let start = at(2026, 9, 5, 14);
        let end = at(2026, 9, 12, 14);
        assert_eq!(count_holidays_within(holidays.iter(), start, end), 2);

        // A checkout before noon leaves the checkout-day holiday outside.
        let end_morning = at(2026, 9, 12, 10);
        assert_eq!(count_holidays_within(holidays.iter(), start, end_morning), 1);

        // Nothing in range.
        let start = at(2026, 11, 1, 14);
        let end = at(2026, 11, 5, 14);
        assert_eq!(count_holidays_within(holidays.iter(), start, end), 0);
    }
}
