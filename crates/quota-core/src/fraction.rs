//! # Fraction Seeding
//!
//! Per-fraction entitlement and the pro-rata balances a new property's
//! creator starts with.
//!
//! ## Seeding Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Property Creation Seeding                            │
//! │                                                                         │
//! │  per_fraction_days = 365 / total_fractions                             │
//! │  annual_total      = total_fractions * per_fraction_days   (≈ 365)     │
//! │                                                                         │
//! │  current_year_days = annual_total * remaining / in_year                │
//! │        where remaining = days left in the year, today inclusive        │
//! │  next_year_days    = annual_total                                      │
//! │                                                                         │
//! │  Example, 52 fractions created on Jul 1st:                             │
//! │    per_fraction_days ≈ 7.0192                                          │
//! │    current_year_days ≈ 365 * 184/365 = 184                             │
//! │    next_year_days    = 365                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The annual total is reconstructed from the fraction count instead of
//! using the 365 constant directly, so the seeded balances and the stored
//! `per_fraction_days` cannot drift apart.

use chrono::{Datelike, NaiveDate};

use crate::error::{CoreResult, ValidationError};
use crate::{DAYS_PER_YEAR, MAX_FRACTIONS, MIN_FRACTIONS};

/// The balances seeded onto the creator's member link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeededBalances {
    /// Stay-days one fraction grants per year.
    pub per_fraction_days: f64,

    /// Full annual allotment for a holder of every fraction.
    pub annual_total_days: f64,

    /// Pro-rata allotment for the remainder of the creation year.
    pub current_year_days: f64,

    /// Full allotment for the following year.
    pub next_year_days: f64,
}

/// Stay-days one fraction grants per year.
pub fn per_fraction_days(total_fractions: u32) -> CoreResult<f64> {
    if !(MIN_FRACTIONS..=MAX_FRACTIONS).contains(&total_fractions) {
        return Err(ValidationError::OutOfRange {
            field: "totalFractions".to_string(),
            min: MIN_FRACTIONS as i64,
            max: MAX_FRACTIONS as i64,
        }
        .into());
    }
    Ok(DAYS_PER_YEAR / f64::from(total_fractions))
}

/// Computes the creator's seeded balances for a property registered today.
///
/// The current-year pool is proportional to the days left in the calendar
/// year (today inclusive, leap years accounted for); the next-year pool
/// is the full annual total.
pub fn seed_balances(total_fractions: u32, today: NaiveDate) -> CoreResult<SeededBalances> {
    let per_fraction = per_fraction_days(total_fractions)?;
    let annual_total = f64::from(total_fractions) * per_fraction;

    let in_year = days_in_year(today.year());
    let remaining = in_year - i64::from(today.ordinal()) + 1;
    let proportion_left = remaining as f64 / in_year as f64;

    Ok(SeededBalances {
        per_fraction_days: per_fraction,
        annual_total_days: annual_total,
        current_year_days: annual_total * proportion_left,
        next_year_days: annual_total,
    })
}

/// Calendar length of a year in days (365 or 366).
fn days_in_year(year: i32) -> i64 {
    let leap = NaiveDate::from_ymd_opt(year, 2, 29).is_some();
    if leap {
        366
    } else {
        365
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_per_fraction_days() {
        let per = per_fraction_days(52).unwrap();
        assert!((per - 7.019_230_769).abs() < 1e-6);

        assert_eq!(per_fraction_days(1).unwrap(), 365.0);

        assert!(matches!(
            per_fraction_days(0),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(matches!(
            per_fraction_days(53),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_annual_total_reconstructs_to_365() {
        for fractions in [1, 2, 7, 13, 52] {
            let seeded = seed_balances(fractions, date(2026, 6, 15)).unwrap();
            assert!(
                (seeded.annual_total_days - 365.0).abs() < 1e-9,
                "fractions={fractions}"
            );
        }
    }

    #[test]
    fn test_seed_on_january_first_grants_full_year() {
        let seeded = seed_balances(52, date(2026, 1, 1)).unwrap();
        assert!((seeded.current_year_days - 365.0).abs() < 1e-9);
        assert!((seeded.next_year_days - 365.0).abs() < 1e-9);
    }

    #[test]
    fn test_seed_on_last_day_grants_one_day_share() {
        let seeded = seed_balances(52, date(2026, 12, 31)).unwrap();
        let expected = 365.0 * (1.0 / 365.0);
        assert!((seeded.current_year_days - expected).abs() < 1e-9);
    }

    #[test]
    fn test_seed_mid_year() {
        // Jul 1st 2026: 184 days left of 365.
        let seeded = seed_balances(52, date(2026, 7, 1)).unwrap();
        let expected = 365.0 * (184.0 / 365.0);
        assert!((seeded.current_year_days - expected).abs() < 1e-9);
    }

    #[test]
    fn test_seed_leap_year_uses_366_days() {
        // 2028 is a leap year; Jan 1st still grants the full allotment.
        let seeded = seed_balances(52, date(2028, 1, 1)).unwrap();
        assert!((seeded.current_year_days - 365.0).abs() < 1e-9);

        // Dec 31st of a leap year is a 1/366 share.
        let seeded = seed_balances(52, date(2028, 12, 31)).unwrap();
        let expected = 365.0 * (1.0 / 366.0);
        assert!((seeded.current_year_days - expected).abs() < 1e-9);
    }
}
