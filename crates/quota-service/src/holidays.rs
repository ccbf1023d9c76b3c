//! # Holiday Lookup Adapter
//!
//! Fetches the public-holiday dates for a year from an external HTTP
//! source.
//!
//! ## Fail-Open Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Holiday Lookup Behavior                              │
//! │                                                                         │
//! │  holidays_for_year(2026)                                               │
//! │       │                                                                 │
//! │       ├── 200 + parsable body ──► Ok({jan 1, apr 21, ...})             │
//! │       ├── timeout / transport  ──► Err(Request)                        │
//! │       └── bad payload          ──► Err(Parse)                          │
//! │                                                                         │
//! │  The admission pipeline treats ANY Err as the empty set (after a       │
//! │  warn!), so a third-party outage can never block bookings. The         │
//! │  result type still distinguishes "no holidays" from "lookup failed"    │
//! │  for callers that care.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::ServiceConfig;

/// Holiday lookup failures.
#[derive(Debug, Error)]
pub enum HolidayError {
    /// Transport-level failure (connect, timeout, non-success status).
    #[error("holiday request failed: {0}")]
    Request(String),

    /// The source answered but the payload was not understood.
    #[error("holiday payload could not be parsed: {0}")]
    Parse(String),
}

/// A source of public-holiday dates, injected into the admission engine.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    /// Returns the set of holiday dates in the given year.
    async fn holidays_for_year(&self, year: i32) -> Result<HashSet<NaiveDate>, HolidayError>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// One row of the holiday endpoint's JSON array.
///
/// Extra fields (name, type) are ignored; only the date matters here.
#[derive(Debug, Deserialize)]
struct HolidayRow {
    date: NaiveDate,
}

/// HTTP-backed holiday source.
///
/// Issues `GET {base_url}/{year}` with a bounded timeout and expects a
/// JSON array of objects carrying an ISO `date` field.
#[derive(Debug, Clone)]
pub struct HttpHolidaySource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpHolidaySource {
    /// Builds the source from service configuration.
    pub fn new(config: &ServiceConfig) -> Result<Self, HolidayError> {
        let client = reqwest::Client::builder()
            .timeout(config.holiday_timeout)
            .build()
            .map_err(|e| HolidayError::Request(e.to_string()))?;

        Ok(HttpHolidaySource {
            client,
            base_url: config.holiday_api_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl HolidaySource for HttpHolidaySource {
    async fn holidays_for_year(&self, year: i32) -> Result<HashSet<NaiveDate>, HolidayError> {
        let url = format!("{}/{}", self.base_url, year);
        debug!(url = %url, "Fetching holidays");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| HolidayError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(HolidayError::Request(format!(
                "unexpected status {} from {url}",
                response.status()
            )));
        }

        let rows: Vec<HolidayRow> = response
            .json()
            .await
            .map_err(|e| HolidayError::Parse(e.to_string()))?;

        debug!(year, count = rows.len(), "Holidays fetched");
        Ok(rows.into_iter().map(|row| row.date).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holiday_row_parses_endpoint_payload() {
        let payload = r#"[
            {"date": "2026-01-01", "name": "New Year", "type": "national"},
            {"date": "2026-04-21", "name": "Some Holiday", "type": "national"}
        ]"#;

        let rows: Vec<HolidayRow> = serde_json::from_str(payload).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let config = ServiceConfig {
            holiday_api_url: "https://example.test/holidays/".to_string(),
            ..ServiceConfig::default()
        };
        let source = HttpHolidaySource::new(&config).unwrap();
        assert_eq!(source.base_url, "https://example.test/holidays");
    }
}
