//! # Service Configuration
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults.
//!
//! ## Variables
//! ```text
//! QUOTA_HOLIDAY_API_URL       Base URL of the public-holiday source
//! QUOTA_HOLIDAY_TIMEOUT_SECS  Holiday request timeout (default 10)
//! ```

use std::env;
use std::time::Duration;

/// Default public-holiday source: BrasilAPI's national holiday endpoint.
/// The year is appended as the final path segment.
const DEFAULT_HOLIDAY_API_URL: &str = "https://brasilapi.com.br/api/feriados/v1";

/// Default bound on a single holiday request. The lookup fails open, so
/// a slow source delays admission by at most this long.
const DEFAULT_HOLIDAY_TIMEOUT_SECS: u64 = 10;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the public-holiday source.
    pub holiday_api_url: String,

    /// Timeout applied to each holiday request.
    pub holiday_timeout: Duration,
}

impl ServiceConfig {
    /// Loads configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to defaults; the holiday
    /// lookup is best-effort, so a bad value degrades instead of failing
    /// startup.
    pub fn from_env() -> Self {
        let holiday_api_url = env::var("QUOTA_HOLIDAY_API_URL")
            .unwrap_or_else(|_| DEFAULT_HOLIDAY_API_URL.to_string());

        let timeout_secs = env::var("QUOTA_HOLIDAY_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_HOLIDAY_TIMEOUT_SECS);

        ServiceConfig {
            holiday_api_url,
            holiday_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            holiday_api_url: DEFAULT_HOLIDAY_API_URL.to_string(),
            holiday_timeout: Duration::from_secs(DEFAULT_HOLIDAY_TIMEOUT_SECS),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.holiday_api_url, DEFAULT_HOLIDAY_API_URL);
        assert_eq!(config.holiday_timeout, Duration::from_secs(10));
    }
}
