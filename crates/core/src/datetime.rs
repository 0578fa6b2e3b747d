//! Date normalisation.
//!
//! Checkin timestamps are stored as `YYYY-MM-DDTHH:MM:SS±HH:MM`. The offset written out always
//! comes from the supplied [`LocalClock`], never from the input, so the same instant written with
//! two different offsets normalises to the same text.
//!
//! Parsing is lenient in the way hand-edited documents need:
//! - RFC 3339 with an offset or `Z` (`2024-01-01T06:22:00+09:00`)
//! - offset forms with a space separator or a colon-less offset (`2024-01-01 06:22:00 +0900`)
//! - naive date-times, read as wall-clock time in the clock's zone (`2024-01-01T06:22`)
//! - a bare date, read as UTC midnight (`2024-01-01`)

use crate::clock::LocalClock;
use crate::constants::DATETIME_FORMAT;
use crate::{CoreError, CoreResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Parses a date/time string into an instant.
///
/// # Errors
///
/// Returns `CoreError::InvalidDatetime` if no accepted shape matches, or if a naive reading
/// does not exist in the clock's zone.
pub fn parse_datetime(raw: &str, clock: &impl LocalClock) -> CoreResult<DateTime<Utc>> {
    let input = raw.trim();
    let invalid = || CoreError::InvalidDatetime(input.to_string());

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return clock.local_to_utc(&naive).ok_or_else(invalid);
        }
    }

    // Bare dates are read as UTC midnight; slashed dates as local midnight.
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
        return Ok(midnight.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y/%m/%d") {
        let naive = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
        return clock.local_to_utc(&naive).ok_or_else(invalid);
    }

    Err(invalid())
}

/// Renders an instant with the offset the clock reports for it.
pub fn format_datetime(instant: &DateTime<Utc>, clock: &impl LocalClock) -> String {
    let offset = clock.offset_at(instant);
    instant
        .with_timezone(&offset)
        .format(DATETIME_FORMAT)
        .to_string()
}

/// Converts an arbitrary date/time string into the canonical checkin timestamp form.
///
/// # Errors
///
/// Returns `CoreError::InvalidDatetime` if `raw` cannot be parsed.
pub fn normalize_datetime(raw: &str, clock: &impl LocalClock) -> CoreResult<String> {
    let instant = parse_datetime(raw, clock)?;
    Ok(format_datetime(&instant, clock))
}
