//! Collection-date handling.
//!
//! Sample collection dates arrive as partial digit strings: `YYYY`,
//! `YYYYMM`, or `YYYYMMDD`. This module converts them to a continuous
//! Julian Day Number plus an uncertainty radius in days, so dates of
//! different precision stay comparable. Missing components default to
//! the middle of the period they span and widen the uncertainty
//! accordingly.

use chrono::{Datelike, NaiveDate};

/// Julian Day Number of 0001-01-01 (proleptic Gregorian) at midnight,
/// minus one day. Adding `num_days_from_ce` yields the JDN at midnight.
const CE_EPOCH_JD: f64 = 1_721_424.5;

/// Uncertainty when only the year is known (half a year, days).
const HALF_YEAR: f64 = 182.0;
/// Uncertainty when year and month are known (half a month, days).
const HALF_MONTH: f64 = 15.0;
/// Uncertainty for a full date (time of day unknown).
const HALF_DAY: f64 = 0.5;

/// Error returned for a collection date that cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid collection date: {reason}")]
pub struct DateError {
    reason: &'static str,
}

impl DateError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A continuous time value with an uncertainty radius, both in days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JulianDay {
    /// Julian Day Number at midnight of the resolved date.
    pub value: f64,
    /// Radius of the interval the partial date spans.
    pub uncertainty: f64,
}

/// Convert a partial date string to a Julian day with uncertainty.
///
/// The first four characters are the year, characters 5-6 the month,
/// and 7-8 the day. A missing month resolves to June with a half-year
/// uncertainty; a missing day resolves to the 15th with a half-month
/// uncertainty; a full date carries a half-day uncertainty.
///
/// # Examples
///
/// ```
/// use imlgs_archive::domain::julian_day_from_partial;
///
/// let jd = julian_day_from_partial("19850615").unwrap();
/// assert_eq!(jd.value, 2446231.5);
/// assert_eq!(jd.uncertainty, 0.5);
///
/// // Year only: mid-year, half-year radius.
/// let jd = julian_day_from_partial("1985").unwrap();
/// assert_eq!(jd.value, 2446231.5);
/// assert_eq!(jd.uncertainty, 182.0);
/// ```
pub fn julian_day_from_partial(s: &str) -> Result<JulianDay, DateError> {
    let bytes = s.as_bytes();
    if bytes.len() < 4 {
        return Err(DateError::new("need at least a 4-digit year"));
    }

    let mut year =
        parse_digits(&bytes[0..4]).ok_or_else(|| DateError::new("year is not numeric"))? as i32;
    // One provider recorded year 9001 for a cruise that sailed in 2001.
    if year == 9001 {
        year = 2001;
    }

    let mut month = 6;
    let mut day = 15;
    let mut uncertainty = HALF_YEAR;
    if bytes.len() >= 6 {
        month = parse_digits(&bytes[4..6]).ok_or_else(|| DateError::new("month is not numeric"))?;
        uncertainty = HALF_MONTH;
        if bytes.len() >= 8 {
            day = parse_digits(&bytes[6..8]).ok_or_else(|| DateError::new("day is not numeric"))?;
            uncertainty = HALF_DAY;
        }
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DateError::new("not a real calendar date"))?;

    Ok(JulianDay {
        value: f64::from(date.num_days_from_ce()) + CE_EPOCH_JD,
        uncertainty,
    })
}

/// Parse ASCII digit bytes into a u32.
fn parse_digits(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, &b| {
        (b as char).to_digit(10).map(|d| acc * 10 + d)
    })
}
