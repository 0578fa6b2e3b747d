//! Core runtime configuration.
//!
//! The clock used to render checkin timestamps is resolved once at process startup and then
//! passed into core services, rather than read from the process-wide timezone during each
//! parse or render.

use crate::clock::Clock;
use crate::{CoreError, CoreResult};
use chrono::FixedOffset;

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    clock: Clock,
}

impl CoreConfig {
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }
}

/// Parses a UTC offset such as `+09:00`, `-0530`, `+09` or `Z`.
///
/// # Errors
///
/// Returns `CoreError::InvalidUtcOffset` if the value is malformed or out of range.
pub fn parse_utc_offset(value: &str) -> CoreResult<FixedOffset> {
    let value = value.trim();
    let invalid = || CoreError::InvalidUtcOffset(value.to_string());

    if value.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match value.as_bytes().first() {
        Some(b'+') => (1, &value[1..]),
        Some(b'-') => (-1, &value[1..]),
        _ => return Err(invalid()),
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) || !(digits.len() == 2 || digits.len() == 4) {
        return Err(invalid());
    }

    let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
    let minutes: i32 = if digits.len() == 4 {
        digits[2..].parse().map_err(|_| invalid())?
    } else {
        0
    };
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// Resolves the clock from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, the host's local zone is used.
pub fn clock_from_env_value(value: Option<String>) -> CoreResult<Clock> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| parse_utc_offset(&v)).transpose()?;

    Ok(parsed.map_or(Clock::System, Clock::Fixed))
}
