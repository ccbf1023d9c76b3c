//! # Quota Pools
//!
//! Stay-day pool selection and range arithmetic.
//!
//! ## The Two-Pool Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Member Link Day Pools                               │
//! │                                                                         │
//! │   Stay starts in...          Pool debited                              │
//! │   ─────────────────          ────────────                              │
//! │   the current year      ──►  current_year_days                         │
//! │   the next year         ──►  next_year_days                            │
//! │   any other year        ──►  rejected (YearNotBookable)                │
//! │                                                                         │
//! │   The pool is chosen from the START date's year. A stay crossing       │
//! │   New Year's Eve is debited entirely from its start year's pool.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Quota Pool
// =============================================================================

/// Which of a member link's two day-balances a stay draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaPool {
    /// Pool for stays starting in the current calendar year.
    CurrentYear,
    /// Pool for stays starting in the next calendar year.
    NextYear,
}

/// Selects the pool a stay draws from, by its start year.
///
/// ## Policy
/// - `stay_year == current_year` selects the current-year pool
/// - `stay_year == current_year + 1` selects the next-year pool
/// - anything else is out of bookable range
pub fn select_pool(stay_year: i32, current_year: i32) -> CoreResult<QuotaPool> {
    if stay_year == current_year {
        Ok(QuotaPool::CurrentYear)
    } else if stay_year == current_year + 1 {
        Ok(QuotaPool::NextYear)
    } else {
        Err(CoreError::YearNotBookable { year: stay_year })
    }
}

// =============================================================================
// Range Arithmetic
// =============================================================================

/// Whole-day duration of a stay range.
///
/// Rejects empty and inverted ranges; truncates partial days, matching
/// how the stay bounds are expressed.
pub fn stay_duration_days(start: DateTime<Utc>, end: DateTime<Utc>) -> CoreResult<i64> {
    if end <= start {
        return Err(CoreError::EndNotAfterStart);
    }
    Ok((end - start).num_days())
}

/// Half-open range overlap test.
///
/// Two stays conflict iff `start_a < end_b && start_b < end_a`. Ranges
/// that merely touch (one ends exactly where the other starts) do not
/// conflict, which is what lets back-to-back stays share a changeover
/// instant.
#[inline]
pub fn ranges_conflict(
    start_a: DateTime<Utc>,
    end_a: DateTime<Utc>,
    start_b: DateTime<Utc>,
    end_b: DateTime<Utc>,
) -> bool {
    start_a < end_b && start_b < end_a
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 14, 0, 0).unwrap()
    }

    #[test]
    fn test_select_pool() {
        assert_eq!(select_pool(2026, 2026).unwrap(), QuotaPool::CurrentYear);
        assert_eq!(select_pool(2027, 2026).unwrap(), QuotaPool::NextYear);

        assert!(matches!(
            select_pool(2028, 2026),
            Err(CoreError::YearNotBookable { year: 2028 })
        ));
        assert!(matches!(
            select_pool(2025, 2026),
            Err(CoreError::YearNotBookable { year: 2025 })
        ));
    }

    #[test]
    fn test_stay_duration() {
        assert_eq!(stay_duration_days(at(2026, 7, 10), at(2026, 7, 15)).unwrap(), 5);

        // Partial days truncate.
        let start = Utc.with_ymd_and_hms(2026, 7, 10, 14, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 7, 12, 10, 0, 0).unwrap();
        assert_eq!(stay_duration_days(start, end).unwrap(), 1);

        assert!(matches!(
            stay_duration_days(at(2026, 7, 15), at(2026, 7, 10)),
            Err(CoreError::EndNotAfterStart)
        ));
        assert!(matches!(
            stay_duration_days(at(2026, 7, 10), at(2026, 7, 10)),
            Err(CoreError::EndNotAfterStart)
        ));
    }

    #[test]
    fn test_ranges_conflict() {
        // Plain overlap.
        assert!(ranges_conflict(
            at(2026, 7, 10),
            at(2026, 7, 15),
            at(2026, 7, 12),
            at(2026, 7, 20)
        ));
        // Containment.
        assert!(ranges_conflict(
            at(2026, 7, 10),
            at(2026, 7, 20),
            at(2026, 7, 12),
            at(2026, 7, 13)
        ));
        // Back-to-back stays do not conflict.
        assert!(!ranges_conflict(
            at(2026, 7, 10),
            at(2026, 7, 15),
            at(2026, 7, 15),
            at(2026, 7, 20)
        ));
        // Disjoint.
        assert!(!ranges_conflict(
            at(2026, 7, 10),
            at(2026, 7, 12),
            at(2026, 7, 20),
            at(2026, 7, 25)
        ));
    }
}
