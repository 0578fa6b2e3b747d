//! Local-clock provider.
//!
//! Rendering a checkin timestamp needs a UTC offset, and interpreting a timestamp written without
//! one needs a local zone. Both come from a [`LocalClock`] passed in by the caller rather than
//! from the process environment, so the same input renders identically on every machine that is
//! configured the same way.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Utc};

/// Source of the UTC offset used when stringifying a point in time.
pub trait LocalClock {
    /// Offset in effect at `instant`.
    fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset;

    /// Interprets a wall-clock reading in this zone. Returns `None` for local times that do not
    /// exist (for example inside a DST gap).
    fn local_to_utc(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>>;
}

fn offset_at_in<Tz: TimeZone>(tz: &Tz, instant: &DateTime<Utc>) -> FixedOffset {
    tz.offset_from_utc_datetime(&instant.naive_utc()).fix()
}

fn local_to_utc_in<Tz: TimeZone>(tz: &Tz, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

impl LocalClock for FixedOffset {
    fn offset_at(&self, _instant: &DateTime<Utc>) -> FixedOffset {
        *self
    }

    fn local_to_utc(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        local_to_utc_in(self, local)
    }
}

impl LocalClock for Utc {
    fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset {
        offset_at_in(self, instant)
    }

    fn local_to_utc(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        Some(local.and_utc())
    }
}

impl LocalClock for Local {
    fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset {
        offset_at_in(self, instant)
    }

    fn local_to_utc(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        local_to_utc_in(self, local)
    }
}

/// Clock selection resolved from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Clock {
    /// Always render with this offset.
    Fixed(FixedOffset),
    /// Follow the host's local zone, including its DST rules.
    #[default]
    System,
}

impl LocalClock for Clock {
    fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset {
        match self {
            Clock::Fixed(offset) => offset.offset_at(instant),
            Clock::System => Local.offset_at(instant),
        }
    }

    fn local_to_utc(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Clock::Fixed(offset) => offset.local_to_utc(local),
            Clock::System => Local.local_to_utc(local),
        }
    }
}

impl<C: LocalClock + ?Sized> LocalClock for &C {
    fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset {
        (**self).offset_at(instant)
    }

    fn local_to_utc(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        (**self).local_to_utc(local)
    }
}
