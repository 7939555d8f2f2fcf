//! Configuration for the rate limiter.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, TidemarkError};

/// Default rate limit when none is configured.
const DEFAULT_LIMIT: u32 = 10;
/// Default window period when none is configured.
const DEFAULT_PERIOD: Period = Period::Minute;

/// The window period for rate limiting.
///
/// Only a small fixed set of periods is supported. The wire format is the
/// period length in whole seconds (`10` or `60`); anything else is rejected
/// at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum Period {
    /// Ten-second window
    TenSeconds,
    /// Sixty-second window
    Minute,
}

impl Period {
    /// Get the duration of this period.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.as_secs())
    }

    /// The period length in whole seconds.
    pub fn as_secs(&self) -> u64 {
        match self {
            Period::TenSeconds => 10,
            Period::Minute => 60,
        }
    }

    /// The period length in milliseconds.
    pub fn as_millis(&self) -> i64 {
        (self.as_secs() * 1000) as i64
    }
}

impl TryFrom<u64> for Period {
    type Error = TidemarkError;

    fn try_from(secs: u64) -> Result<Self> {
        match secs {
            10 => Ok(Period::TenSeconds),
            60 => Ok(Period::Minute),
            other => Err(TidemarkError::Config(format!(
                "Unsupported period: {}s (expected 10 or 60)",
                other
            ))),
        }
    }
}

impl From<Period> for u64 {
    fn from(period: Period) -> Self {
        period.as_secs()
    }
}

/// Options for a rate limiter instance.
///
/// Options are immutable for the lifetime of the limiter they configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitOptions {
    /// Maximum number of admitted requests per window
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// The window period
    #[serde(default = "default_period")]
    pub period: Period,
}

impl Default for RateLimitOptions {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            period: default_period(),
        }
    }
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_period() -> Period {
    DEFAULT_PERIOD
}

impl RateLimitOptions {
    /// Create options with an explicit limit and period.
    pub fn new(limit: u32, period: Period) -> Self {
        Self { limit, period }
    }

    /// Load options from a YAML file path.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let options: RateLimitOptions = serde_yaml::from_str(&contents)
            .map_err(|e| TidemarkError::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check that the options describe a usable limiter.
    ///
    /// A zero limit denies every request; in a configuration file that is
    /// almost certainly a mistake, so file loading rejects it.
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(TidemarkError::Config(
                "limit must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_durations() {
        assert_eq!(Period::TenSeconds.duration(), Duration::from_secs(10));
        assert_eq!(Period::Minute.duration(), Duration::from_secs(60));
        assert_eq!(Period::Minute.as_millis(), 60_000);
    }

    #[test]
    fn test_period_from_seconds() {
        assert_eq!(Period::try_from(10).unwrap(), Period::TenSeconds);
        assert_eq!(Period::try_from(60).unwrap(), Period::Minute);
        assert!(Period::try_from(30).is_err());
        assert!(Period::try_from(0).is_err());
    }

    #[test]
    fn test_default_options() {
        let options = RateLimitOptions::default();
        assert_eq!(options.limit, 10);
        assert_eq!(options.period, Period::Minute);
    }

    #[test]
    fn test_parse_options_yaml() {
        let options: RateLimitOptions = serde_yaml::from_str("limit: 5\nperiod: 10").unwrap();
        assert_eq!(options.limit, 5);
        assert_eq!(options.period, Period::TenSeconds);
    }

    #[test]
    fn test_parse_applies_defaults() {
        let options: RateLimitOptions = serde_yaml::from_str("{}").unwrap();
        assert_eq!(options.limit, 10);
        assert_eq!(options.period, Period::Minute);
    }

    #[test]
    fn test_parse_rejects_unsupported_period() {
        let result = serde_yaml::from_str::<RateLimitOptions>("period: 120");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let options = RateLimitOptions::new(0, Period::Minute);
        assert!(options.validate().is_err());
    }
}
