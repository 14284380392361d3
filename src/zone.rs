//! Attaching a civil wall clock to a named timezone.
//!
//! Zones only decorate Gregorian output: the civil fields and the day
//! number stay exactly as computed.

use crate::error::CalendarError;
use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Resolves an IANA zone name, `None` meaning UTC.
///
/// # Errors
/// Returns `CalendarError::UnsupportedTimezone` if the tz database has no such zone.
pub fn resolve(name: Option<&str>) -> Result<Tz, CalendarError> {
    match name {
        None => Ok(Tz::UTC),
        Some(name) => name
            .trim()
            .parse::<Tz>()
            .map_err(|_| CalendarError::UnsupportedTimezone(name.to_owned())),
    }
}

/// Places `wall_clock` in `zone` without shifting it.
///
/// An ambiguous wall clock takes the earlier offset. A wall clock that falls
/// in a DST gap moves forward by the one hour the gap skips.
///
/// # Errors
/// Returns `CalendarError::UnsupportedTimezone` if the zone cannot place the
/// wall clock at all.
pub fn attach(wall_clock: NaiveDateTime, zone: Tz) -> Result<DateTime<Tz>, CalendarError> {
    match zone.from_local_datetime(&wall_clock) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt),
        LocalResult::None => zone
            .from_local_datetime(&(wall_clock + Duration::hours(1)))
            .earliest()
            .ok_or_else(|| CalendarError::UnsupportedTimezone(zone.name().to_owned())),
    }
}
