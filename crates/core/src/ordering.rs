//! Chronological ordering of checkins.

use crate::document::Checkin;
use chrono::{DateTime, Utc};

fn sort_key(checkin: &Checkin) -> (bool, Option<DateTime<Utc>>) {
    let instant = DateTime::parse_from_rfc3339(checkin.datetime.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc));
    (instant.is_none(), instant)
}

/// Stably sorts checkins ascending by instant.
///
/// Checkins with equal instants keep their relative order. Checkins whose `datetime` is not a
/// valid RFC 3339 timestamp go after all others, also in their original order.
pub fn sort_checkins(checkins: &mut [Checkin]) {
    checkins.sort_by_key(sort_key);
}
