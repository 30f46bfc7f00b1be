//! # Temporal Types: Calendar Dates and the Clock
//!
//! Birth dates are plain calendar dates with no time zone. The only
//! "current time" the form needs is today's date, and it is always
//! obtained through a [`Clock`] so validation stays deterministic under test.
//!
//! `today()` is taken in UTC. A submission made shortly after local
//! midnight on New Year's Day may therefore see the previous year.

use chrono::{NaiveDate, Utc};

use crate::error::FpageError;

/// Source of today's date.
pub trait Clock: Send + Sync {
    /// Today's calendar date.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time, in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock frozen at a fixed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// Surrounding whitespace is ignored. Anything else that is not exactly a
/// valid date in that format is rejected, including timestamps.
pub fn parse_date(s: &str) -> Result<NaiveDate, FpageError> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| FpageError::InvalidDate {
        value: s.to_string(),
        reason: e.to_string(),
    })
}
