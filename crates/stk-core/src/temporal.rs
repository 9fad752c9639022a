//! # Temporal Types — UTC Timestamps
//!
//! Defines `Timestamp`, the UTC-only, seconds-precision instant used for
//! license expiration and issuance dates.
//!
//! Parsing is lenient about offsets and fractional seconds so that records
//! written by other tools (`2026-01-15T12:00:00.000Z`) load cleanly; the
//! value is always normalized to UTC and truncated to whole seconds.

use chrono::{DateTime, Duration, Months, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StkError;

/// A UTC timestamp, truncated to seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// From a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse an RFC 3339 string with any offset, converting to UTC.
    pub fn parse(s: &str) -> Result<Self, StkError> {
        let dt = DateTime::parse_from_rfc3339(s.trim())
            .map_err(|e| StkError::License(format!("invalid RFC 3339 timestamp {s:?}: {e}")))?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// The instant `days` whole days later. Saturates at the chrono range.
    pub fn plus_days(&self, days: i64) -> Self {
        Self(
            Duration::try_days(days)
                .and_then(|d| self.0.checked_add_signed(d))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        )
    }

    /// The same calendar instant `years` later.
    pub fn plus_years(&self, years: u32) -> Self {
        Self(
            self.0
                .checked_add_months(Months::new(years.saturating_mul(12)))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        )
    }

    /// Whole days from `now` until this instant, rounded up.
    ///
    /// Zero or negative once the instant has passed.
    pub fn days_until(&self, now: Timestamp) -> i64 {
        let secs = (self.0 - now.0).num_seconds();
        let day = 86_400;
        if secs > 0 {
            (secs + day - 1) / day
        } else {
            secs / day
        }
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
